use actix_web::web;

pub mod access;
pub mod auth;
pub mod clientes;
pub mod documentos;
pub mod health;
pub mod usuarios;

/// Register every HTTP route. Used by `main.rs` and by the integration
/// tests, which wrap the same services without CORS.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .service(web::scope("/auth").configure(auth::configure_routes))
        .service(web::scope("/usuarios").configure(usuarios::configure_routes))
        .service(web::scope("/clientes").configure(clientes::configure_routes))
        .service(web::scope("/documentos").configure(documentos::configure_routes));
}
