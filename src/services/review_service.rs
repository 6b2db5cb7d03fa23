use mongodb::bson::{doc, oid::ObjectId};
use serde_json::{Map, Value};

use crate::database::FindSpec;
use crate::services::repository::Repository;
use crate::utils::document::{to_document, to_json_list};
use crate::utils::error::{AppError, AppResult};

pub const COLLECTION: &str = "reviews";

pub struct ReviewService {
    repo: Repository,
}

impl ReviewService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, fields: Map<String, Value>) -> AppResult<ObjectId> {
        if fields.keys().all(|key| key == "_id") {
            return Err(AppError::Validation("review must not be empty".to_string()));
        }
        self.repo.create(to_document(fields)?).await
    }

    pub async fn list(&self) -> AppResult<Value> {
        Ok(to_json_list(self.repo.list(doc! {}, FindSpec::default()).await?))
    }
}
