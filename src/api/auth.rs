use actix_web::{web, HttpResponse};

use crate::models::{Payload, TokenResponse};
use crate::state::AppState;
use crate::utils::error::AppResult;

/// POST /jwt - signs whatever object the client sends, valid for one hour
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = Payload,
    responses(
        (status = 200, description = "Signed token", body = TokenResponse),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn issue_token(
    state: web::Data<AppState>,
    body: web::Json<Payload>,
) -> AppResult<HttpResponse> {
    let claims = body.into_inner().into_inner();
    log::info!(
        "🔐 POST /jwt - email: {}",
        claims.get("email").and_then(|v| v.as_str()).unwrap_or("N/A")
    );

    let token = state.tokens.issue(claims)?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
