//! Configuration structures
//!
//! Loaded by `altolink_infra::config` from environment variables or a
//! JSON/TOML file. Only the database path and the Alto client credentials are
//! mandatory; everything else has a default.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ALTO_PRODUCTION_API_BASE, ALTO_SANDBOX_API_BASE, ALTO_TOKEN_URL, DEFAULT_ALTO_SCOPE,
};
use crate::types::AltoEnvironment;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub alto: AltoConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: default_bind_addr() }
    }
}

/// Alto (Zoopla) partner settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltoConfig {
    #[serde(default)]
    pub environment: AltoEnvironment,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_token_url")]
    pub sandbox_auth_url: String,
    #[serde(default = "default_sandbox_api_base")]
    pub sandbox_api_base: String,
    #[serde(default = "default_token_url")]
    pub production_auth_url: String,
    #[serde(default = "default_production_api_base")]
    pub production_api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl AltoConfig {
    /// Settings with the partner's default endpoints.
    pub fn new(
        environment: AltoEnvironment,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: default_scope(),
            sandbox_auth_url: default_token_url(),
            sandbox_api_base: default_sandbox_api_base(),
            production_auth_url: default_token_url(),
            production_api_base: default_production_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Token endpoint for the given environment.
    pub fn auth_url(&self, environment: AltoEnvironment) -> &str {
        match environment {
            AltoEnvironment::Sandbox => &self.sandbox_auth_url,
            AltoEnvironment::Production => &self.production_auth_url,
        }
    }

    /// API base URL for the given environment, without a trailing slash.
    pub fn api_base_url(&self, environment: AltoEnvironment) -> &str {
        let base = match environment {
            AltoEnvironment::Sandbox => &self.sandbox_api_base,
            AltoEnvironment::Production => &self.production_api_base,
        };
        base.trim_end_matches('/')
    }

    pub fn has_credentials(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

impl fmt::Debug for AltoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AltoConfig")
            .field("environment", &self.environment)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .field("sandbox_auth_url", &self.sandbox_auth_url)
            .field("sandbox_api_base", &self.sandbox_api_base)
            .field("production_auth_url", &self.production_auth_url)
            .field("production_api_base", &self.production_api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_pool_size() -> u32 {
    4
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_scope() -> String {
    DEFAULT_ALTO_SCOPE.to_string()
}

fn default_token_url() -> String {
    ALTO_TOKEN_URL.to_string()
}

fn default_sandbox_api_base() -> String {
    ALTO_SANDBOX_API_BASE.to_string()
}

fn default_production_api_base() -> String {
    ALTO_PRODUCTION_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
