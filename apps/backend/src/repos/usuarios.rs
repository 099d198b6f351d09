//! Account repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::adapters::usuarios_sea as usuarios_adapter;
use crate::adapters::usuarios_sea::{UsuarioCreate, UsuarioUpdate};
use crate::auth::policy::{AccountStatus, Principal, Role};
use crate::entities::usuarios;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

/// Account domain model. Raw role/status spellings are already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Usuario {
    pub id: Uuid,
    pub nome: String,
    pub login: String,
    pub senha_hash: String,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

impl Usuario {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            login: self.login.clone(),
            nome: self.nome.clone(),
            role: self.role,
        }
    }
}

impl TryFrom<usuarios::Model> for Usuario {
    type Error = DomainError;

    fn try_from(m: usuarios::Model) -> Result<Self, Self::Error> {
        let role = m.perfil.parse::<Role>().map_err(|e| {
            DomainError::infra(InfraErrorKind::DataCorruption, format!("usuario {}: {e}", m.id))
        })?;
        let status = m.status.parse::<AccountStatus>().map_err(|e| {
            DomainError::infra(InfraErrorKind::DataCorruption, format!("usuario {}: {e}", m.id))
        })?;
        Ok(Self {
            id: m.id,
            nome: m.nome,
            login: m.login,
            senha_hash: m.senha_hash,
            role,
            status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

/// Input for a new account; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUsuario {
    pub nome: String,
    pub login: String,
    pub senha_hash: String,
    pub role: Role,
    pub status: AccountStatus,
}

#[derive(Debug, Clone)]
pub struct UsuarioChanges {
    pub nome: String,
    pub role: Role,
    pub status: AccountStatus,
    pub senha_hash: Option<String>,
}

pub async fn find_by_login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    login: &str,
) -> Result<Option<Usuario>, DomainError> {
    usuarios_adapter::find_by_login(conn, login)
        .await?
        .map(Usuario::try_from)
        .transpose()
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Usuario>, DomainError> {
    usuarios_adapter::find_by_id(conn, id)
        .await?
        .map(Usuario::try_from)
        .transpose()
}

/// Like [`find_by_id`] but missing is an error.
pub async fn require_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Usuario, DomainError> {
    find_by_id(conn, id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Usuario, format!("Usuario {id} not found"))
    })
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Usuario>, DomainError> {
    usuarios_adapter::list_all(conn)
        .await?
        .into_iter()
        .map(Usuario::try_from)
        .collect()
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new: NewUsuario,
) -> Result<Usuario, DomainError> {
    if usuarios_adapter::find_by_login(conn, &new.login).await?.is_some() {
        return Err(DomainError::conflict(
            ConflictKind::LoginTaken,
            "Login already registered",
        ));
    }
    let model = usuarios_adapter::create_usuario(
        conn,
        UsuarioCreate {
            nome: new.nome,
            login: new.login,
            senha_hash: new.senha_hash,
            perfil: new.role.code().to_string(),
            status: new.status.code().to_string(),
        },
    )
    .await?;
    Usuario::try_from(model)
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    changes: UsuarioChanges,
) -> Result<Usuario, DomainError> {
    require_by_id(conn, id).await?;
    let model = usuarios_adapter::update_usuario(
        conn,
        UsuarioUpdate {
            id,
            nome: changes.nome,
            perfil: changes.role.code().to_string(),
            status: changes.status.code().to_string(),
            senha_hash: changes.senha_hash,
        },
    )
    .await?;
    Usuario::try_from(model)
}

/// Refuses to delete an account that still owns records.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<(), DomainError> {
    require_by_id(conn, id).await?;
    let owned = usuarios_adapter::count_owned_records(conn, id).await?;
    if owned > 0 {
        return Err(DomainError::conflict(
            ConflictKind::AccountHasRecords,
            format!("Usuario owns {owned} record(s); reassign or delete them first"),
        ));
    }
    usuarios_adapter::delete_usuario(conn, id).await?;
    Ok(())
}
