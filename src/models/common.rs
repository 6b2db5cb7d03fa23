use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::database::UpdateOutcome;

/// Loosely typed JSON object accepted as a request body
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[schema(value_type = Object)]
pub struct Payload(pub Map<String, Value>);

impl Payload {
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl From<ObjectId> for InsertResponse {
    fn from(id: ObjectId) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id.to_hex(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

impl From<UpdateOutcome> for UpdateResponse {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: outcome.matched,
            modified_count: outcome.modified,
            upserted_count: 0,
            upserted_id: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<u64> for DeleteResponse {
    fn from(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
