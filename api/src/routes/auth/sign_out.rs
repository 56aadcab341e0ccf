use actix_web::{web, HttpRequest, HttpResponse};

use rg_core::repositories::{TokenBlacklistRepository, UserRepository};
use rg_shared::ApiResponse;

use crate::dto::auth::RefreshTokenRequest;
use crate::handlers::ApiError;
use crate::middleware::auth::extract_bearer_token;

use super::AppState;

/// Handler for POST /api/v1/auth/sign-out
///
/// Revokes the bearer access token, if any, and the refresh token from the
/// body, if any. Invalid, expired or already revoked tokens do not make the
/// call fail.
pub async fn sign_out<U, B>(
    req: HttpRequest,
    state: web::Data<AppState<U, B>>,
    request: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
{
    let access_token = extract_bearer_token(req.headers());
    let refresh_token = request.and_then(|r| r.into_inner().refresh_token);

    let revoked = state
        .auth_service
        .sign_out(access_token, refresh_token.as_deref())
        .await?;
    log::debug!("Sign-out revoked {} token(s)", revoked);

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Signed out successfully")))
}
