//! Application configuration loaded from environment variables.
//!
//! Secrets (the JWT signing key and the identity provider API key) are read
//! once at startup and kept in memory for the lifetime of the process.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Base URL of the hosted identity provider (GoTrue-style REST API)
    pub auth_base_url: String,
    /// Frontend URL for CORS allow-listing
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,

    // --- Secrets ---
    /// Public API key sent with every identity provider request
    pub auth_api_key: String,
    /// Shared HS256 secret used to verify access tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local
    /// development; deployed environments inject real env vars.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            auth_base_url: env::var("AUTH_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("AUTH_BASE_URL"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            auth_api_key: env::var("AUTH_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("AUTH_API_KEY"))?,
            jwt_signing_key: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET"))?
                .into_bytes(),
        })
    }

    /// Fixed configuration for tests (no environment access).
    pub fn test_default() -> Self {
        Self {
            auth_base_url: "http://localhost:9999".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            auth_api_key: "test_anon_key".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("AUTH_BASE_URL", "https://auth.example.com/");
        env::set_var("AUTH_API_KEY", "anon_key");
        env::set_var("JWT_SECRET", "test_jwt_key_32_bytes_minimum!!!");

        let config = Config::from_env().expect("Config should load");

        // Trailing slash is stripped so client code can join paths
        assert_eq!(config.auth_base_url, "https://auth.example.com");
        assert_eq!(config.auth_api_key, "anon_key");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_config_test_default_is_self_contained() {
        let config = Config::test_default();
        assert!(config.jwt_signing_key.len() >= 32);
        assert_eq!(config.gcp_project_id, "test-project");
    }
}
