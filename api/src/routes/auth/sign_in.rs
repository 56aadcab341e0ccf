use actix_web::{web, HttpResponse};
use validator::Validate;

use rg_core::repositories::{TokenBlacklistRepository, UserRepository};
use rg_shared::ApiResponse;

use crate::dto::auth::{SessionData, SignInRequest};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/sign-in
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "...", "data": { "user": { ... }, "token": "eyJ...", "refreshToken": "eyJ..." } }
/// ```
///
/// ## Errors
/// - 404 `USER_NOT_FOUND`
/// - 401 `INVALID_CREDENTIALS`
pub async fn sign_in<U, B>(
    state: web::Data<AppState<U, B>>,
    request: web::Json<SignInRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
{
    request.validate()?;

    let session = state
        .auth_service
        .sign_in(&request.email, &request.password)
        .await?;

    let data = SessionData {
        user: session.user,
        token: session.tokens.access_token,
        refresh_token: session.tokens.refresh_token,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(data).with_message("Signed in successfully")))
}
