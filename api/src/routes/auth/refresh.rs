use actix_web::{web, HttpResponse};

use rg_core::repositories::{TokenBlacklistRepository, UserRepository};
use rg_shared::ApiResponse;

use crate::dto::auth::{RefreshTokenRequest, TokenPairDto};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/refresh-token
///
/// Exchanges a refresh token for a new pair. The submitted token is
/// consumed: presenting it again fails with `INVALID_TOKEN`.
///
/// # Request Body
///
/// ```json
/// { "refreshToken": "eyJ..." }
/// ```
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "data": { "token": "eyJ...", "refreshToken": "eyJ...", "expiresIn": 900 } }
/// ```
///
/// ## Errors
/// - 401 `MISSING_TOKEN`, `INVALID_TOKEN`, `REFRESH_TOKEN_EXPIRED`
/// - 404 `USER_NOT_FOUND`
pub async fn refresh_token<U, B>(
    state: web::Data<AppState<U, B>>,
    request: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
{
    let refresh_token = request.and_then(|r| r.into_inner().refresh_token);

    let pair = state
        .auth_service
        .refresh(refresh_token.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(TokenPairDto::from(pair))))
}
