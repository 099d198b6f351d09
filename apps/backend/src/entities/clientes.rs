use sea_orm::entity::prelude::*;
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clientes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_name = "usuario_id")]
    pub usuario_id: Uuid,
    pub nome_completo: String,
    pub email: String,
    pub estado_civil: String,
    pub profissao: String,
    pub cpf: String,
    pub rg: String,
    pub orgao_expedidor: String,
    pub nit: String,
    pub numero_beneficio: String,
    pub data_nascimento: Date,
    pub nome_mae: String,
    pub nome_pai: String,
    pub endereco: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
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
