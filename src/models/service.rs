use serde::Deserialize;
use serde_json::{Map, Value};

use crate::utils::error::{AppError, AppResult};

/// Required fields of a salon service, extra fields (`description`, `img`...)
/// are stored untouched
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewService {
    pub title: String,
    /// Number or numeric string, stored as a double
    #[schema(value_type = f64)]
    pub price: Price,
}

impl NewService {
    pub fn from_fields(fields: &Map<String, Value>) -> AppResult<Self> {
        serde_json::from_value(Value::Object(fields.clone()))
            .map_err(|e| AppError::Validation(format!("invalid service: {}", e)))
    }

    /// Writes the validated title and the coerced price back into `fields`
    pub fn write_to(self, fields: &mut Map<String, Value>) -> AppResult<()> {
        let price = self.price.value()?;
        fields.insert("title".to_string(), Value::from(self.title));
        fields.insert("price".to_string(), Value::from(price));
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl Price {
    pub fn value(&self) -> AppResult<f64> {
        let value = match self {
            Price::Number(n) => *n,
            Price::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| AppError::Validation(format!("price is not a number: {}", text)))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(AppError::Validation("price must be finite".to_string()))
        }
    }
}

/// Replaces `price` (when present) by its floating point value
pub fn coerce_price(fields: &mut Map<String, Value>) -> AppResult<()> {
    let Some(raw) = fields.get("price") else {
        return Ok(());
    };

    let price: Price = serde_json::from_value(raw.clone())
        .map_err(|_| AppError::Validation("price must be a number".to_string()))?;
    fields.insert("price".to_string(), Value::from(price.value()?));

    Ok(())
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServiceListQuery {
    /// Maximum number of services, ignored when not a positive integer
    pub limit: Option<String>,
}

impl ServiceListQuery {
    /// Reads leading digits like `parseInt`: "5abc" is 5, "abc" is no limit
    pub fn limit(&self) -> Option<i64> {
        let raw = self.limit.as_deref()?.trim();
        let (sign, digits) = match raw.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, raw.strip_prefix('+').unwrap_or(raw)),
        };

        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let value = digits[..end].parse::<i64>().ok()? * sign;

        (value > 0).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_price_string_is_coerced() {
        let mut body = fields(json!({ "title": "Haircut", "price": "25.5" }));
        coerce_price(&mut body).unwrap();
        assert_eq!(body["price"], json!(25.5));

        let mut integer = fields(json!({ "price": 40 }));
        coerce_price(&mut integer).unwrap();
        assert_eq!(integer["price"].as_f64(), Some(40.0));
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        let mut body = fields(json!({ "price": "cheap" }));
        assert!(matches!(coerce_price(&mut body), Err(AppError::Validation(_))));

        let mut nested = fields(json!({ "price": { "amount": 3 } }));
        assert!(coerce_price(&mut nested).is_err());
    }

    #[test]
    fn test_service_requires_title_and_price() {
        assert!(NewService::from_fields(&fields(json!({ "price": 10 }))).is_err());
        assert!(NewService::from_fields(&fields(json!({ "title": "Nails" }))).is_err());

        let ok = NewService::from_fields(&fields(json!({
            "title": "Nails",
            "price": "12",
            "img": "nails.png"
        })))
        .unwrap();
        assert_eq!(ok.title, "Nails");
        assert_eq!(ok.price.value().unwrap(), 12.0);
    }

    #[test]
    fn test_write_to_keeps_untyped_extras() {
        let mut body = fields(json!({ "title": "Nails", "price": "12", "description": 5 }));

        NewService::from_fields(&body).unwrap().write_to(&mut body).unwrap();

        assert_eq!(body["price"], json!(12.0));
        assert_eq!(body["description"], json!(5));
    }

    #[test]
    fn test_limit_parsing() {
        let query = |raw: &str| ServiceListQuery { limit: Some(raw.to_string()) }.limit();

        assert_eq!(query("6"), Some(6));
        assert_eq!(query("3items"), Some(3));
        assert_eq!(query("abc"), None);
        assert_eq!(query("0"), None);
        assert_eq!(query("-2"), None);
        assert_eq!(ServiceListQuery::default().limit(), None);
    }
}
