//! SeaORM adapter for document records.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde_json::Value;
use uuid::Uuid;

use crate::entities::documentos;

pub mod dto;

pub use dto::DocumentoFields;

fn encode_form(form: Option<serde_json::Map<String, Value>>) -> Option<String> {
    form.map(|m| Value::Object(m).to_string())
}

/// All documents, newest first, or only those owned by `owner`.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner: Option<Uuid>,
) -> Result<Vec<documentos::Model>, sea_orm::DbErr> {
    let mut query = documentos::Entity::find();
    if let Some(owner) = owner {
        query = query.filter(documentos::Column::UsuarioId.eq(owner));
    }
    query
        .order_by_desc(documentos::Column::DataUltimaEdicao)
        .order_by_asc(documentos::Column::Titulo)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<documentos::Model>, sea_orm::DbErr> {
    documentos::Entity::find_by_id(id).one(conn).await
}

pub async fn count_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    documentos::Entity::find().count(conn).await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner: Uuid,
    f: DocumentoFields,
) -> Result<documentos::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = documentos::ActiveModel {
        id: Set(Uuid::new_v4()),
        usuario_id: Set(owner),
        tipo_documento: Set(f.tipo_documento),
        titulo: Set(f.titulo),
        tom_texto: Set(f.tom_texto),
        conteudo: Set(f.conteudo),
        status: Set(f.status),
        data_creacao: Set(f.data_creacao),
        data_ultima_edicao: Set(f.data_ultima_edicao),
        gerado_por_ia: Set(f.gerado_por_ia),
        dados_formulario: Set(encode_form(f.dados_formulario)),
        imagem_url: Set(f.imagem_url),
        created_at: Set(now),
        updated_at: Set(now),
    };

    active.insert(conn).await
}

/// Overwrites the editable fields. `usuario_id` is never touched.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: documentos::Model,
    f: DocumentoFields,
) -> Result<documentos::Model, sea_orm::DbErr> {
    let mut active: documentos::ActiveModel = existing.into();
    active.tipo_documento = Set(f.tipo_documento);
    active.titulo = Set(f.titulo);
    active.tom_texto = Set(f.tom_texto);
    active.conteudo = Set(f.conteudo);
    active.status = Set(f.status);
    active.data_creacao = Set(f.data_creacao);
    active.data_ultima_edicao = Set(f.data_ultima_edicao);
    active.gerado_por_ia = Set(f.gerado_por_ia);
    active.dados_formulario = Set(encode_form(f.dados_formulario));
    active.imagem_url = Set(f.imagem_url);
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let res = documentos::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
