use actix_web::HttpResponse;

use crate::dto::auth::MeResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Runs behind `JwtAuth`, which has already verified the token and loaded
/// the user.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        success: true,
        user: auth.user,
    })
}
