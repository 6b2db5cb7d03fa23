use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

use crate::utils::error::{AppError, AppResult};

/// Converts a JSON object coming from a request body into a BSON document.
/// Client supplied `_id` fields are dropped, the store assigns identifiers.
pub fn to_document(mut fields: Map<String, Value>) -> AppResult<Document> {
    fields.remove("_id");
    bson::to_document(&fields)
        .map_err(|e| AppError::Validation(format!("unsupported document: {}", e)))
}

/// Renders a stored document as JSON, ObjectIds become plain hex strings.
pub fn to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

pub fn to_json_list(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(to_json).collect())
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
