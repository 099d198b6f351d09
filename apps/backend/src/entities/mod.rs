pub mod clientes;
pub mod documentos;
pub mod usuarios;

pub use clientes::Entity as Clientes;
pub use documentos::Entity as Documentos;
pub use usuarios::Entity as Usuarios;
