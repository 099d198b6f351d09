//! Repository functions for the domain layer (generic over ConnectionTrait).

pub mod clientes;
pub mod documentos;
pub mod usuarios;
