use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Salon Booking API",
        version = "1.0.0",
        description = "Services, bookings, reviews and users of the salon.\n\n**Authentication:** obtain a token from `POST /jwt` and send it as `Authorization: Bearer <token>`. User administration additionally requires the \"Admin\" role."
    ),
    paths(
        // Health
        crate::api::health::root,
        crate::api::health::health_check,

        // Auth
        crate::api::auth::issue_token,

        // Services
        crate::api::services::list_services,
        crate::api::services::get_service,
        crate::api::services::create_service,
        crate::api::services::update_service,
        crate::api::services::delete_service,

        // Bookings
        crate::api::bookings::create_booking,
        crate::api::bookings::list_bookings,

        // Reviews
        crate::api::reviews::list_reviews,
        crate::api::reviews::create_review,

        // Users
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::get_user_role,
        crate::api::users::update_user_role,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::Payload,
            crate::models::InsertResponse,
            crate::models::UpdateResponse,
            crate::models::DeleteResponse,
            crate::models::MessageResponse,
            crate::models::TokenResponse,
            crate::models::NewService,
            crate::models::NewBooking,
            crate::models::NewUser,
            crate::models::RoleUpdate,
            crate::models::RoleResponse,
            crate::utils::error::ErrorBody,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database health."),
        (name = "Auth", description = "Bearer token issuance."),
        (name = "Services", description = "Salon services catalog."),
        (name = "Bookings", description = "Customer bookings."),
        (name = "Reviews", description = "Customer reviews."),
        (name = "Users", description = "Users and admin role management."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /jwt"))
                        .build()
                ),
            );
        }
    }
}
