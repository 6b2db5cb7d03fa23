use actix_web::{web, HttpResponse};

use crate::models::{
    DeleteResponse, InsertResponse, NewService, Payload, ServiceListQuery, UpdateResponse,
};
use crate::state::AppState;
use crate::utils::error::AppResult;

/// GET /services - all services, optionally limited
#[utoipa::path(
    get,
    path = "/services",
    tag = "Services",
    params(ServiceListQuery),
    responses(
        (status = 200, description = "List of services")
    )
)]
pub async fn list_services(
    state: web::Data<AppState>,
    query: web::Query<ServiceListQuery>,
) -> AppResult<HttpResponse> {
    let limit = query.limit();
    log::info!("💇 GET /services - limit: {:?}", limit);

    let services = state.services().list(limit).await?;
    Ok(HttpResponse::Ok().json(services))
}

/// GET /services/{id} - the service, or `null` when it does not exist
#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = "Services",
    params(("id" = String, Path, description = "Service ObjectId (hex)")),
    responses(
        (status = 200, description = "Service document or null"),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_service(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    log::info!("💇 GET /services/{}", id);

    let service = state.services().get(&id).await?;
    Ok(HttpResponse::Ok().json(service))
}

#[utoipa::path(
    post,
    path = "/services",
    tag = "Services",
    request_body = NewService,
    responses(
        (status = 200, description = "Service created", body = InsertResponse),
        (status = 400, description = "Missing title or non-numeric price"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_service(
    state: web::Data<AppState>,
    body: web::Json<Payload>,
) -> AppResult<HttpResponse> {
    log::info!("📝 POST /services");

    let id = state.services().create(body.into_inner().into_inner()).await?;
    log::info!("✅ Service created: {}", id);
    Ok(HttpResponse::Ok().json(InsertResponse::from(id)))
}

/// PATCH /services/{id} - partial update. Not behind the auth gate.
#[utoipa::path(
    patch,
    path = "/services/{id}",
    tag = "Services",
    params(("id" = String, Path, description = "Service ObjectId (hex)")),
    request_body = Payload,
    responses(
        (status = 200, description = "Update acknowledged", body = UpdateResponse),
        (status = 400, description = "Malformed id or price")
    )
)]
pub async fn update_service(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<Payload>,
) -> AppResult<HttpResponse> {
    log::info!("🔧 PATCH /services/{}", id);

    let outcome = state.services().update(&id, body.into_inner().into_inner()).await?;
    Ok(HttpResponse::Ok().json(UpdateResponse::from(outcome)))
}

/// DELETE /services/{id} - not behind the auth gate
#[utoipa::path(
    delete,
    path = "/services/{id}",
    tag = "Services",
    params(("id" = String, Path, description = "Service ObjectId (hex)")),
    responses(
        (status = 200, description = "Delete acknowledged", body = DeleteResponse),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_service(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    log::info!("🗑️  DELETE /services/{}", id);

    let deleted = state.services().delete(&id).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse::from(deleted)))
}
