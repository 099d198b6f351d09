use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::infra::state::build_state;
use backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use backend::routes;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

/// Fresh, migrated in-memory SQLite database per call.
pub async fn test_state() -> AppState {
    build_state()
        .with_db_url("sqlite::memory:")
        .with_security(SecurityConfig::new(TEST_SECRET))
        .build()
        .await
        .expect("build test state")
}

/// Production routes and middleware, minus CORS.
pub async fn create_test_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(state)
            .configure(routes::configure),
    )
    .await
}
