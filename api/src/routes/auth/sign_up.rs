use actix_web::{web, HttpResponse};
use validator::Validate;

use rg_core::repositories::{TokenBlacklistRepository, UserRepository};

use crate::dto::auth::{SignUpRequest, SignUpResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/sign-up
///
/// # Request Body
///
/// ```json
/// { "name": "A", "email": "a@x.com", "password": "secret1" }
/// ```
///
/// ## Success (201 Created)
/// ```json
/// { "success": true, "message": "...", "token": "eyJ...", "refreshToken": "eyJ...", "user": { ... } }
/// ```
///
/// ## Errors
/// - 400 `VALIDATION_ERROR`
/// - 409 `USER_ALREADY_EXISTS`
pub async fn sign_up<U, B>(
    state: web::Data<AppState<U, B>>,
    request: web::Json<SignUpRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
{
    request.validate()?;

    let session = state
        .auth_service
        .sign_up(&request.name, &request.email, &request.password)
        .await?;

    log::info!("Registered user {}", session.user.id);

    Ok(HttpResponse::Created().json(SignUpResponse {
        success: true,
        message: "User registered successfully".to_string(),
        token: session.tokens.access_token,
        refresh_token: session.tokens.refresh_token,
        user: session.user,
    }))
}
