use std::sync::Arc;

use crate::database::DocumentStore;
use crate::services::{
    booking_service, catalog_service, review_service, user_service, BookingService, Repository,
    ReviewService, ServiceCatalog, TokenService, UserService,
};

/// Shared by every worker; the store handle is the only connection state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    fn repository(&self, collection: &'static str) -> Repository {
        Repository::new(Arc::clone(&self.store), collection)
    }

    pub fn services(&self) -> ServiceCatalog {
        ServiceCatalog::new(self.repository(catalog_service::COLLECTION))
    }

    pub fn bookings(&self) -> BookingService {
        BookingService::new(self.repository(booking_service::COLLECTION))
    }

    pub fn reviews(&self) -> ReviewService {
        ReviewService::new(self.repository(review_service::COLLECTION))
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.repository(user_service::COLLECTION))
    }
}
