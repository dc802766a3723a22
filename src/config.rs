use std::env;

use crate::utils::AppError;

const DEFAULT_JWT_SECRET: &str = "default-secret-change-me";

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Empty means any origin is allowed
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::Internal(format!("PORT must be a valid port number: {}", e)))?,
            None => 5000,
        };

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::Internal("DATABASE_URL must be set".to_string()))?;

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                log::warn!("⚠️  JWT_SECRET not set, using the development default");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_url,
            jwt_secret,
            cors_allowed_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "mongodb://localhost:27017/shop")])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.jwt_secret, DEFAULT_JWT_SECRET);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_database_url_is_required() {
        let result = Config::from_lookup(lookup_from(&[("PORT", "8080")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mongodb://localhost:27017"),
            ("PORT", "not-a-port"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_cors_origins_are_split() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mongodb://localhost:27017"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, http://127.0.0.1:5173,"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000".to_string(), "http://127.0.0.1:5173".to_string()]
        );
        assert_eq!(config.jwt_secret, "s3cret");
    }
}
