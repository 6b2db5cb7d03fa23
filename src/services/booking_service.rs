use mongodb::bson::{doc, oid::ObjectId};
use serde_json::{Map, Value};

use crate::database::FindSpec;
use crate::models::{listing_projection, listing_sort, NewBooking};
use crate::services::repository::Repository;
use crate::utils::document::{to_document, to_json_list};
use crate::utils::error::AppResult;

pub const COLLECTION: &str = "bookings";

pub struct BookingService {
    repo: Repository,
}

impl BookingService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, mut fields: Map<String, Value>) -> AppResult<ObjectId> {
        NewBooking::from_fields(&fields)?.write_to(&mut fields);
        self.repo.create(to_document(fields)?).await
    }

    /// With an email: every booking made with it, unprojected and unsorted.
    /// Without: all bookings by userName, reduced to the listing fields.
    pub async fn list(&self, email: Option<&str>) -> AppResult<Value> {
        let docs = match email {
            Some(email) => self.repo.list(doc! { "email": email }, FindSpec::default()).await?,
            None => {
                let spec = FindSpec {
                    sort: Some(listing_sort()),
                    projection: Some(listing_projection()),
                    limit: None,
                };
                self.repo.list(doc! {}, spec).await?
            }
        };

        Ok(to_json_list(docs))
    }
}
