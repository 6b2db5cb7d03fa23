use std::env;

use crate::services::auth_service::TOKEN_TTL_SECS;

/// Atlas cluster the salon database lives on
const CLUSTER_HOST: &str = "cluster0.l0lz8w0.mongodb.net";
const DEFAULT_DATABASE: &str = "jerinsParlour";
const DEFAULT_PORT: u16 = 5000;
const MEMORY_URI: &str = "memory://";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not valid: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let port = match var("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let mongodb_uri = match var("MONGODB_URI") {
            Some(uri) => uri,
            None => format!(
                "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
                required("DB_USER")?,
                required("DB_PASSWORD")?,
                CLUSTER_HOST
            ),
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            mongodb_uri,
            database_name: var("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            jwt_secret: required("JWT_TOKEN")?,
            token_ttl_secs: TOKEN_TTL_SECS,
            cors_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// `MONGODB_URI=memory://` runs against a throwaway in-process store
    pub fn in_memory(&self) -> bool {
        self.mongodb_uri == MEMORY_URI
    }

    /// Connection string with the password masked, for logs
    pub fn redacted_uri(&self) -> String {
        match (self.mongodb_uri.find("://"), self.mongodb_uri.rfind('@')) {
            (Some(scheme), Some(at)) if at > scheme => {
                format!("{}://***@{}", &self.mongodb_uri[..scheme], &self.mongodb_uri[at + 1..])
            }
            _ => self.mongodb_uri.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_and_cluster_uri() {
        let config = config(&[
            ("DB_USER", "salon"),
            ("DB_PASSWORD", "pw"),
            ("JWT_TOKEN", "secret"),
        ])
        .unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.database_name, "jerinsParlour");
        assert_eq!(
            config.mongodb_uri,
            "mongodb+srv://salon:pw@cluster0.l0lz8w0.mongodb.net/?retryWrites=true&w=majority"
        );
        assert_eq!(config.token_ttl_secs, 3600);
        assert!(config.cors_origins.is_empty());
        assert!(!config.redacted_uri().contains("pw"));
    }

    #[test]
    fn test_uri_override_skips_credentials() {
        let config = config(&[
            ("MONGODB_URI", "mongodb://localhost:27017"),
            ("JWT_TOKEN", "secret"),
            ("PORT", "8080"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, http://localhost:5173,"),
        ])
        .unwrap();

        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert!(!config.in_memory());
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_missing_and_invalid_values() {
        assert_eq!(
            config(&[("MONGODB_URI", "mongodb://localhost")]).unwrap_err(),
            ConfigError::Missing("JWT_TOKEN")
        );
        assert_eq!(
            config(&[("JWT_TOKEN", "secret")]).unwrap_err(),
            ConfigError::Missing("DB_USER")
        );
        assert!(matches!(
            config(&[("MONGODB_URI", "mongodb://localhost"), ("JWT_TOKEN", "s"), ("PORT", "web")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
    }
}
