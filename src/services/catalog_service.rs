use mongodb::bson::{doc, oid::ObjectId};
use serde_json::{Map, Value};

use crate::database::{FindSpec, UpdateOutcome};
use crate::models::{coerce_price, NewService};
use crate::services::repository::Repository;
use crate::utils::document::{to_document, to_json, to_json_list};
use crate::utils::error::AppResult;

pub const COLLECTION: &str = "services";

/// Salon services offered to customers
pub struct ServiceCatalog {
    repo: Repository,
}

impl ServiceCatalog {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, mut fields: Map<String, Value>) -> AppResult<ObjectId> {
        NewService::from_fields(&fields)?.write_to(&mut fields)?;
        self.repo.create(to_document(fields)?).await
    }

    /// `None` serializes as `null`, absent services are not an error
    pub async fn get(&self, id: &str) -> AppResult<Option<Value>> {
        Ok(self.repo.get_by_id(id).await?.map(to_json))
    }

    pub async fn list(&self, limit: Option<i64>) -> AppResult<Value> {
        let spec = FindSpec {
            limit,
            ..Default::default()
        };
        Ok(to_json_list(self.repo.list(doc! {}, spec).await?))
    }

    pub async fn update(&self, id: &str, mut fields: Map<String, Value>) -> AppResult<UpdateOutcome> {
        coerce_price(&mut fields)?;
        self.repo.update(id, to_document(fields)?).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        self.repo.delete(id).await
    }
}
