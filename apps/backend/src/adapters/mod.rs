//! SeaORM adapters. Functions here return `sea_orm::DbErr`; the repos
//! layer maps it to `DomainError`.

pub mod clientes_sea;
pub mod documentos_sea;
pub mod usuarios_sea;
