use actix_web::{web, HttpResponse};

use crate::models::{BookingQuery, InsertResponse, NewBooking, Payload};
use crate::state::AppState;
use crate::utils::error::AppResult;

/// POST /bookings - open to anonymous clients
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    request_body = NewBooking,
    responses(
        (status = 200, description = "Booking created", body = InsertResponse),
        (status = 400, description = "Missing userName, email or title")
    )
)]
pub async fn create_booking(
    state: web::Data<AppState>,
    body: web::Json<Payload>,
) -> AppResult<HttpResponse> {
    log::info!("📅 POST /bookings");

    let id = state.bookings().create(body.into_inner().into_inner()).await?;
    log::info!("✅ Booking created: {}", id);
    Ok(HttpResponse::Ok().json(InsertResponse::from(id)))
}

#[utoipa::path(
    get,
    path = "/bookings",
    tag = "Bookings",
    params(BookingQuery),
    responses(
        (status = 200, description = "Bookings for the email, or every booking sorted by userName"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_bookings(
    state: web::Data<AppState>,
    query: web::Query<BookingQuery>,
) -> AppResult<HttpResponse> {
    let email = query.email();
    log::info!("📅 GET /bookings - email: {}", email.unwrap_or("*"));

    let bookings = state.bookings().list(email).await?;
    Ok(HttpResponse::Ok().json(bookings))
}
