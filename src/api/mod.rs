pub mod auth;
pub mod bookings;
pub mod health;
pub mod reviews;
pub mod services;
pub mod swagger;
pub mod users;


use actix_web::{error::JsonPayloadError, guard, web, HttpRequest};

use crate::middleware::{RequireAdmin, RequireAuth};
use crate::utils::error::AppError;

/// Malformed bodies get the same `{error, message}` envelope as other errors
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        AppError::Validation(format!("invalid JSON body: {}", err)).into()
    })
}

/// Route table. Resources sharing a path are split by method guard so each
/// one carries only the gates it needs.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .route("/jwt", web::post().to(auth::issue_token))
        // Services
        .service(
            web::resource("/services")
                .guard(guard::Get())
                .route(web::get().to(services::list_services)),
        )
        .service(
            web::resource("/services")
                .guard(guard::Post())
                .wrap(RequireAuth)
                .route(web::post().to(services::create_service)),
        )
        .service(
            web::resource("/services/{id}")
                .guard(guard::Get())
                .wrap(RequireAuth)
                .route(web::get().to(services::get_service)),
        )
        // Known gap: PATCH and DELETE on a service are not gated
        .service(
            web::resource("/services/{id}")
                .route(web::patch().to(services::update_service))
                .route(web::delete().to(services::delete_service)),
        )
        // Bookings: creation is open to anonymous clients
        .service(
            web::resource("/bookings")
                .guard(guard::Post())
                .route(web::post().to(bookings::create_booking)),
        )
        .service(
            web::resource("/bookings")
                .guard(guard::Get())
                .wrap(RequireAuth)
                .route(web::get().to(bookings::list_bookings)),
        )
        // Reviews
        .service(
            web::resource("/reviews")
                .guard(guard::Get())
                .route(web::get().to(reviews::list_reviews)),
        )
        .service(
            web::resource("/reviews")
                .guard(guard::Post())
                .wrap(RequireAuth)
                .route(web::post().to(reviews::create_review)),
        )
        // Users
        .service(
            web::resource("/users")
                .guard(guard::Post())
                .route(web::post().to(users::create_user)),
        )
        .service(
            web::resource("/users")
                .guard(guard::Get())
                .wrap(RequireAuth)
                .route(web::get().to(users::list_users)),
        )
        .service(
            web::resource("/users/admin/{email}")
                .guard(guard::Get())
                .wrap(RequireAuth)
                .route(web::get().to(users::get_user_role)),
        )
        // RequireAuth is wrapped last so it runs before RequireAdmin
        .service(
            web::resource("/users/admin/{id}")
                .guard(guard::Patch())
                .wrap(RequireAdmin)
                .wrap(RequireAuth)
                .route(web::patch().to(users::update_user_role)),
        )
        .service(
            web::resource("/users/admin/{name}")
                .guard(guard::Delete())
                .wrap(RequireAdmin)
                .wrap(RequireAuth)
                .route(web::delete().to(users::delete_user)),
        );
}
