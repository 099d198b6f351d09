//! Bearer header helpers.

use backend::auth::SessionClaims;
use backend::repos::usuarios::Usuario;
use backend::state::app_state::AppState;

/// `Bearer <token>` for an account, minted the same way login does.
pub fn bearer_for(state: &AppState, usuario: &Usuario) -> String {
    let claims = SessionClaims {
        sub: usuario.id.to_string(),
        login: usuario.login.clone(),
        perfil: usuario.role.code().to_string(),
    };
    bearer(&state.tokens.create(&claims.into_claims(), None))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
