use actix_web::{post, web, HttpResponse};

use super::envelope;
use crate::domain::entities::user::LoginRequest;
use crate::errors::AppError;
use crate::interfaces::middlewares::auth::AuthenticatedUser;
use crate::AppState;

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let success = state.auth_handler.login(payload.into_inner()).await?;
    Ok(envelope::ok_with_token(
        "Login success",
        success.user,
        &success.token,
    ))
}

/// Tokens are stateless, so logout is an acknowledgement; the client drops
/// the token.
#[post("/logout")]
pub async fn logout() -> HttpResponse {
    envelope::ok_message("Logout success")
}

#[post("/validate-token")]
pub async fn validate_token(user: AuthenticatedUser) -> HttpResponse {
    envelope::ok("Token is valid", user.0)
}
