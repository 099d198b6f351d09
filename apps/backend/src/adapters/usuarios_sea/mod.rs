//! SeaORM adapter for accounts.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{clientes, documentos, usuarios};

pub mod dto;

pub use dto::{UsuarioCreate, UsuarioUpdate};

pub async fn find_by_login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    login: &str,
) -> Result<Option<usuarios::Model>, sea_orm::DbErr> {
    usuarios::Entity::find()
        .filter(usuarios::Column::Login.eq(login))
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<usuarios::Model>, sea_orm::DbErr> {
    usuarios::Entity::find_by_id(id).one(conn).await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<usuarios::Model>, sea_orm::DbErr> {
    usuarios::Entity::find()
        .order_by_asc(usuarios::Column::Nome)
        .order_by_asc(usuarios::Column::Login)
        .all(conn)
        .await
}

pub async fn create_usuario<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UsuarioCreate,
) -> Result<usuarios::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = usuarios::ActiveModel {
        id: Set(Uuid::new_v4()),
        nome: Set(dto.nome),
        login: Set(dto.login),
        senha_hash: Set(dto.senha_hash),
        perfil: Set(dto.perfil),
        status: Set(dto.status),
        created_at: Set(now),
        updated_at: Set(now),
    };

    active.insert(conn).await
}

pub async fn update_usuario<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UsuarioUpdate,
) -> Result<usuarios::Model, sea_orm::DbErr> {
    let existing = usuarios::Entity::find_by_id(dto.id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("usuarios.id {}", dto.id)))?;

    let mut active: usuarios::ActiveModel = existing.into();
    active.nome = Set(dto.nome);
    active.perfil = Set(dto.perfil);
    active.status = Set(dto.status);
    if let Some(hash) = dto.senha_hash {
        active.senha_hash = Set(hash);
    }
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await
}

/// Rows deleted (0 or 1).
pub async fn delete_usuario<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let res = usuarios::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}

/// Clients plus documents owned by the account.
pub async fn count_owned_records<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let clientes = clientes::Entity::find()
        .filter(clientes::Column::UsuarioId.eq(id))
        .count(conn)
        .await?;
    let documentos = documentos::Entity::find()
        .filter(documentos::Column::UsuarioId.eq(id))
        .count(conn)
        .await?;
    Ok(clientes + documentos)
}
