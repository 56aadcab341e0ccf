//! Application factory
//!
//! Builds the Actix-web application from shared state so `main` and the
//! integration tests serve exactly the same routes.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};
use rg_core::repositories::{TokenBlacklistRepository, UserRepository};
use rg_infra::health::failing_components;
use rg_shared::{CorsConfig, HealthResponse};

use crate::handlers::ApiError;
use crate::middleware::{auth::JwtAuth, cors::create_cors, AccessVerifier};
use crate::routes::auth::{me, refresh_token, sign_in, sign_out, sign_up, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, B>(
    app_state: web::Data<AppState<U, B>>,
    cors_config: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
{
    let verifier: Arc<dyn AccessVerifier> = app_state.auth_service.token_service().clone();
    let jwt_auth = JwtAuth::new(verifier);

    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(create_cors(cors_config))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check::<U, B>))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/sign-up", web::post().to(sign_up::<U, B>))
                    .route("/sign-in", web::post().to(sign_in::<U, B>))
                    .route("/sign-out", web::post().to(sign_out::<U, B>))
                    .route("/refresh-token", web::post().to(refresh_token::<U, B>))
                    .route("/me", web::get().to(me).wrap(jwt_auth)),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Pings every configured backing service; any failure answers 503.
async fn health_check<U, B>(state: web::Data<AppState<U, B>>) -> HttpResponse
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
{
    let version = env!("CARGO_PKG_VERSION");
    let failing = failing_components(&state.health_checks).await;
    if failing.is_empty() {
        return HttpResponse::Ok().json(HealthResponse::healthy(state.storage.clone(), version));
    }

    log::warn!("Health check failing for: {}", failing.join(", "));
    HttpResponse::ServiceUnavailable().json(HealthResponse::unhealthy(
        state.storage.clone(),
        version,
        failing,
    ))
}

async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}
