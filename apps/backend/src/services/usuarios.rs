use sea_orm::ConnectionTrait;
use tracing::info;
use uuid::Uuid;

use crate::auth::claims::SessionClaims;
use crate::auth::password::{hash_password, verify_dummy, verify_password};
use crate::auth::policy::{AccountStatus, Role};
use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::usuarios::{self, NewUsuario, Usuario, UsuarioChanges};

/// Token plus the account it was issued for.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub usuario: Usuario,
}

/// Check credentials and issue a session token.
///
/// Unknown login, wrong password and inactive account all produce the same
/// `InvalidCredentials` error.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tokens: &TokenService,
    login: &str,
    senha: &str,
) -> Result<LoginOutcome, AppError> {
    let login = login.trim();
    let Some(usuario) = usuarios::find_by_login(conn, login).await? else {
        verify_dummy(senha);
        security::login_failed("unknown_login", login);
        return Err(AppError::invalid_credentials());
    };
    if !verify_password(&usuario.senha_hash, senha) {
        security::login_failed("bad_password", login);
        return Err(AppError::invalid_credentials());
    }
    if !usuario.is_active() {
        security::login_failed("inactive_account", login);
        return Err(AppError::invalid_credentials());
    }

    let claims = SessionClaims {
        sub: usuario.id.to_string(),
        login: usuario.login.clone(),
        perfil: usuario.role.code().to_string(),
    };
    let token = tokens.create(&claims.into_claims(), None);
    info!(usuario_id = %usuario.id, login = %Redacted(&usuario.login), "login succeeded");

    Ok(LoginOutcome { token, usuario })
}

/// Fields accepted when creating an account.
#[derive(Debug, Clone)]
pub struct RegisterUsuario {
    pub nome: String,
    pub login: String,
    pub senha: String,
    pub perfil: Option<String>,
}

/// Fields accepted when updating an account.
#[derive(Debug, Clone)]
pub struct EditUsuario {
    pub nome: String,
    pub perfil: String,
    pub status: String,
    pub senha: Option<String>,
}

fn non_blank(name: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{name} must not be blank")));
    }
    Ok(trimmed.to_string())
}

fn parse_role(raw: &str) -> Result<Role, DomainError> {
    raw.parse::<Role>().map_err(DomainError::validation)
}

fn parse_status(raw: &str) -> Result<AccountStatus, DomainError> {
    raw.parse::<AccountStatus>().map_err(DomainError::validation)
}

pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    input: RegisterUsuario,
) -> Result<Usuario, AppError> {
    let nome = non_blank("nome", &input.nome)?;
    let login = non_blank("login", &input.login)?;
    if login.chars().any(char::is_whitespace) {
        return Err(DomainError::validation("login must not contain spaces").into());
    }
    if input.senha.is_empty() {
        return Err(DomainError::validation("senha must not be empty").into());
    }
    let role = match input.perfil.as_deref() {
        Some(raw) => parse_role(raw)?,
        None => Role::User,
    };

    let usuario = usuarios::create(
        conn,
        NewUsuario {
            nome,
            login,
            senha_hash: hash_password(&input.senha)?,
            role,
            status: AccountStatus::Active,
        },
    )
    .await?;
    info!(usuario_id = %usuario.id, perfil = %usuario.role, "usuario created");
    Ok(usuario)
}

pub async fn edit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
    input: EditUsuario,
) -> Result<Usuario, AppError> {
    let nome = non_blank("nome", &input.nome)?;
    let role = parse_role(&input.perfil)?;
    let status = parse_status(&input.status)?;
    let senha_hash = match input.senha.as_deref() {
        Some(s) if !s.is_empty() => Some(hash_password(s)?),
        _ => None,
    };

    let usuario = usuarios::update(
        conn,
        id,
        UsuarioChanges {
            nome,
            role,
            status,
            senha_hash,
        },
    )
    .await?;
    Ok(usuario)
}

/// Create or promote an administrative, active account and reset its password.
pub async fn upsert_admin<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    login: &str,
    senha: &str,
    nome: &str,
) -> Result<(Usuario, bool), AppError> {
    let login = non_blank("login", login)?;
    let nome = non_blank("nome", nome)?;
    if senha.is_empty() {
        return Err(DomainError::validation("password must not be empty").into());
    }
    let senha_hash = hash_password(senha)?;

    match usuarios::find_by_login(conn, &login).await? {
        Some(existing) => {
            let updated = usuarios::update(
                conn,
                existing.id,
                UsuarioChanges {
                    nome,
                    role: Role::Admin,
                    status: AccountStatus::Active,
                    senha_hash: Some(senha_hash),
                },
            )
            .await?;
            Ok((updated, false))
        }
        None => {
            let created = usuarios::create(
                conn,
                NewUsuario {
                    nome,
                    login,
                    senha_hash,
                    role: Role::Admin,
                    status: AccountStatus::Active,
                },
            )
            .await?;
            Ok((created, true))
        }
    }
}
