pub mod seed;
pub mod usuarios;
