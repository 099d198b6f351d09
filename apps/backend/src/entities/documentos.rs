use sea_orm::entity::prelude::*;
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "documentos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub tipo_documento: String,
    pub titulo: String,
    pub tom_texto: String,
    #[sea_orm(column_type = "Text")]
    pub conteudo: String,
    pub status: String,
    pub data_creacao: Date,
    pub data_ultima_edicao: Date,
    pub gerado_por_ia: bool,
    /// Serialized JSON object
    #[sea_orm(column_type = "Text", nullable)]
    pub dados_formulario: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub imagem_url: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuarios::Entity",
        from = "Column::UsuarioId",
        to = "super::usuarios::Column::Id",
        on_delete = "Restrict"
    )]
    Usuario,
}

impl Related<super::usuarios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Usuario.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
