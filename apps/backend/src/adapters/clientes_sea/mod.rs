//! SeaORM adapter for client records.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::clientes;

pub mod dto;

pub use dto::ClienteFields;

/// All clients, or only those owned by `owner`.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner: Option<Uuid>,
) -> Result<Vec<clientes::Model>, sea_orm::DbErr> {
    let mut query = clientes::Entity::find();
    if let Some(owner) = owner {
        query = query.filter(clientes::Column::UsuarioId.eq(owner));
    }
    query
        .order_by_asc(clientes::Column::NomeCompleto)
        .order_by_asc(clientes::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<clientes::Model>, sea_orm::DbErr> {
    clientes::Entity::find_by_id(id).one(conn).await
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    clientes::Entity::find().count(conn).await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner: Uuid,
    f: ClienteFields,
) -> Result<clientes::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = clientes::ActiveModel {
        id: Set(Uuid::new_v4()),
        usuario_id: Set(owner),
        nome_completo: Set(f.nome_completo),
        email: Set(f.email),
        estado_civil: Set(f.estado_civil),
        profissao: Set(f.profissao),
        cpf: Set(f.cpf),
        rg: Set(f.rg),
        orgao_expedidor: Set(f.orgao_expedidor),
        nit: Set(f.nit),
        numero_beneficio: Set(f.numero_beneficio),
        data_nascimento: Set(f.data_nascimento),
        nome_mae: Set(f.nome_mae),
        nome_pai: Set(f.nome_pai),
        endereco: Set(f.endereco),
        bairro: Set(f.bairro),
        cidade: Set(f.cidade),
        uf: Set(f.uf),
        created_at: Set(now),
        updated_at: Set(now),
    };

    active.insert(conn).await
}

/// Overwrites the editable fields. `usuario_id` is never touched.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: clientes::Model,
    f: ClienteFields,
) -> Result<clientes::Model, sea_orm::DbErr> {
    let mut active: clientes::ActiveModel = existing.into();
    active.nome_completo = Set(f.nome_completo);
    active.email = Set(f.email);
    active.estado_civil = Set(f.estado_civil);
    active.profissao = Set(f.profissao);
    active.cpf = Set(f.cpf);
    active.rg = Set(f.rg);
    active.orgao_expedidor = Set(f.orgao_expedidor);
    active.nit = Set(f.nit);
    active.numero_beneficio = Set(f.numero_beneficio);
    active.data_nascimento = Set(f.data_nascimento);
    active.nome_mae = Set(f.nome_mae);
    active.nome_pai = Set(f.nome_pai);
    active.endereco = Set(f.endereco);
    active.bairro = Set(f.bairro);
    active.cidade = Set(f.cidade);
    active.uf = Set(f.uf);
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let res = clientes::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
