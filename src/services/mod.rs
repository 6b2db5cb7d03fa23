pub mod auth_service;
pub mod booking_service;
pub mod catalog_service;
pub mod repository;
pub mod review_service;
pub mod user_service;

pub use auth_service::{Claims, TokenService};
pub use booking_service::BookingService;
pub use catalog_service::ServiceCatalog;
pub use repository::Repository;
pub use review_service::ReviewService;
pub use user_service::{CreateUserOutcome, UserService};
