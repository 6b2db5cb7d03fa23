use actix_web::{web, HttpResponse};

use crate::models::{InsertResponse, Payload};
use crate::services::Claims;
use crate::state::AppState;
use crate::utils::error::AppResult;

#[utoipa::path(
    get,
    path = "/reviews",
    tag = "Reviews",
    responses(
        (status = 200, description = "All reviews")
    )
)]
pub async fn list_reviews(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    log::info!("⭐ GET /reviews");

    let reviews = state.reviews().list().await?;
    Ok(HttpResponse::Ok().json(reviews))
}

#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    request_body = Payload,
    responses(
        (status = 200, description = "Review created", body = InsertResponse),
        (status = 400, description = "Empty review"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_review(
    claims: web::ReqData<Claims>,
    state: web::Data<AppState>,
    body: web::Json<Payload>,
) -> AppResult<HttpResponse> {
    log::info!("⭐ POST /reviews - by {}", claims.email().unwrap_or("N/A"));

    let id = state.reviews().create(body.into_inner().into_inner()).await?;
    Ok(HttpResponse::Ok().json(InsertResponse::from(id)))
}
