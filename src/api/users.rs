use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};

use crate::models::{
    DeleteResponse, InsertResponse, MessageResponse, NewUser, Payload, RoleResponse, RoleUpdate,
    UpdateResponse,
};
use crate::services::CreateUserOutcome;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

/// POST /users - registers the email once, later calls only report it exists
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 200, description = "User created, or `{message}` when the email is taken", body = InsertResponse),
        (status = 400, description = "Missing email")
    )
)]
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<Payload>,
) -> AppResult<HttpResponse> {
    log::info!("👤 POST /users");

    match state.users().create(body.into_inner().into_inner()).await? {
        CreateUserOutcome::Created(id) => {
            log::info!("✅ User created: {}", id);
            Ok(HttpResponse::Ok().json(InsertResponse::from(id)))
        }
        CreateUserOutcome::AlreadyExists => Ok(HttpResponse::Ok().json(MessageResponse {
            message: "user already exists.".to_string(),
        })),
    }
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    log::info!("👥 GET /users");

    let users = state.users().list().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// GET /users/admin/{email} - the stored role. Lookup failures answer `{}`.
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Role of the user, omitted when unset", body = RoleResponse),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_role(
    state: web::Data<AppState>,
    email: web::Path<String>,
) -> HttpResponse {
    log::info!("👤 GET /users/admin/{}", email);

    let role = match state.users().role_of(&email).await {
        Ok(role) => role,
        Err(e) => {
            log::error!("❌ Role lookup failed for {}: {}", email, e);
            None
        }
    };

    HttpResponse::Ok().json(RoleResponse { role })
}

/// Only an empty body falls back to the default role, any other body must be
/// a JSON `{role}` object
fn role_update(req: &HttpRequest, body: &[u8]) -> AppResult<RoleUpdate> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RoleUpdate::default());
    }

    let content_type = req.content_type();
    if content_type != "application/json" && !content_type.ends_with("+json") {
        return Err(AppError::Validation(format!(
            "invalid JSON body: unsupported content type '{}'",
            content_type
        )));
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("invalid JSON body: {}", e)))
}

#[utoipa::path(
    patch,
    path = "/users/admin/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    request_body(content = RoleUpdate, description = "Optional, the role defaults to \"Admin\""),
    responses(
        (status = 200, description = "Update acknowledged", body = UpdateResponse),
        (status = 400, description = "Malformed id or role body"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user_role(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let update = role_update(&req, &body)?;
    log::info!("🔧 PATCH /users/admin/{} - role: {}", id, update.role());

    let outcome = state.users().set_role(&id, update.role()).await?;
    Ok(HttpResponse::Ok().json(UpdateResponse::from(outcome)))
}

#[utoipa::path(
    delete,
    path = "/users/admin/{name}",
    tag = "Users",
    params(("name" = String, Path, description = "User name")),
    responses(
        (status = 200, description = "Delete acknowledged", body = DeleteResponse),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> AppResult<HttpResponse> {
    log::info!("🗑️  DELETE /users/admin/{}", name);

    let deleted = state.users().delete_by_name(&name).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse::from(deleted)))
}
