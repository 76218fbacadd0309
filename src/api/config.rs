//! API client configuration.
//!
//! Provides configuration for the per-entity CRUD endpoints the
//! reconciler talks to.

use std::env;

/// API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL the per-entity routes hang off, e.g.
    /// `http://localhost:3000/api`
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `TMNT_API_URL`: base URL of the tournament API
    /// - `TMNT_API_TIMEOUT`: request timeout in seconds (default: 30)
    ///
    /// # Panics
    ///
    /// Panics if `TMNT_API_URL` is not set
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("TMNT_API_URL").expect("TMNT_API_URL must be set"),
            timeout_secs: env::var("TMNT_API_TIMEOUT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("TMNT_API_TIMEOUT must be a valid u64"),
        }
    }

    /// Create a default configuration for development
    pub fn development() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::development()
    }
}
