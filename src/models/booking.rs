use mongodb::bson::{doc, Bson, Document};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::utils::error::{AppError, AppResult};

/// Fields returned by the full bookings listing
pub const LISTING_FIELDS: [&str; 5] = ["_id", "userName", "email", "title", "isPaid"];

/// Required fields of a booking. Anything else (`isPaid`, dates, phone...)
/// is stored as posted.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub user_name: String,
    pub email: String,
    /// Title of the booked service
    pub title: String,
}

impl NewBooking {
    pub fn from_fields(fields: &Map<String, Value>) -> AppResult<Self> {
        serde_json::from_value(Value::Object(fields.clone()))
            .map_err(|e| AppError::Validation(format!("invalid booking: {}", e)))
    }

    pub fn write_to(self, fields: &mut Map<String, Value>) {
        fields.insert("userName".to_string(), Value::from(self.user_name));
        fields.insert("email".to_string(), Value::from(self.email));
        fields.insert("title".to_string(), Value::from(self.title));
    }
}

pub fn listing_projection() -> Document {
    LISTING_FIELDS
        .iter()
        .map(|field| (field.to_string(), Bson::Int32(1)))
        .collect()
}

pub fn listing_sort() -> Document {
    doc! { "userName": 1 }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingQuery {
    /// Only bookings made with this email, as full documents
    pub email: Option<String>,
}

impl BookingQuery {
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }
}
