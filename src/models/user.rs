use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::error::{AppError, AppResult};

pub const ADMIN_ROLE: &str = "Admin";

/// Users are keyed on `email`, other fields (`name`...) are stored as posted
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewUser {
    pub email: String,
}

impl NewUser {
    pub fn from_fields(fields: &Map<String, Value>) -> AppResult<Self> {
        let user: NewUser = serde_json::from_value(Value::Object(fields.clone()))
            .map_err(|e| AppError::Validation(format!("invalid user: {}", e)))?;

        if user.email.trim().is_empty() {
            return Err(AppError::Validation("email must not be empty".to_string()));
        }
        Ok(user)
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct RoleUpdate {
    /// Defaults to "Admin"
    pub role: Option<String>,
}

impl RoleUpdate {
    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or(ADMIN_ROLE)
    }
}

/// `role` is omitted when the user has none
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoleResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
