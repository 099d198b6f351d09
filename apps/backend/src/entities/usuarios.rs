use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nome: String,
    #[sea_orm(unique)]
    pub login: String,
    #[sea_orm(column_name = "senha_hash")]
    pub senha_hash: String,
    /// Raw role code; parsed into `Role` by the repo layer
    pub perfil: String,
    /// Raw status code; parsed into `AccountStatus` by the repo layer
    pub status: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::clientes::Entity")]
    Clientes,
    #[sea_orm(has_many = "super::documentos::Entity")]
    Documentos,
}

impl Related<super::clientes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clientes.def()
    }
}

impl Related<super::documentos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documentos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
