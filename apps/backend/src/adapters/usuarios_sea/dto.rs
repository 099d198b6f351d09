//! DTOs for usuarios_sea adapter.

/// DTO for creating an account. `perfil` and `status` are storage codes.
#[derive(Debug, Clone)]
pub struct UsuarioCreate {
    pub nome: String,
    pub login: String,
    pub senha_hash: String,
    pub perfil: String,
    pub status: String,
}

/// DTO for updating an account. `None` leaves the password untouched.
#[derive(Debug, Clone)]
pub struct UsuarioUpdate {
    pub id: uuid::Uuid,
    pub nome: String,
    pub perfil: String,
    pub status: String,
    pub senha_hash: Option<String>,
}
