use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::token::TokenService;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent in some test scenarios)
    db: Option<DatabaseConnection>,
    /// Security configuration including token settings
    pub security: SecurityConfig,
    /// Token service bound to `security`
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        let tokens = TokenService::new(&security);
        Self {
            db: Some(db),
            security,
            tokens,
        }
    }

    /// AppState without a database connection (for testing)
    pub fn without_db(security: SecurityConfig) -> Self {
        let tokens = TokenService::new(&security);
        Self {
            db: None,
            security,
            tokens,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
