//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_AGE_REQUIREMENT, DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Minimum age in whole years for new registrations
    pub age_requirement: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("age_requirement", &self.age_requirement)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            age_requirement: DEFAULT_AGE_REQUIREMENT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            age_requirement: parse_age_requirement(env::var("AGE_REQUIREMENT").ok()),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_age_requirement(raw: Option<String>) -> u32 {
    match raw {
        None => DEFAULT_AGE_REQUIREMENT,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(
                "AGE_REQUIREMENT={:?} is not a whole number, using {}",
                value,
                DEFAULT_AGE_REQUIREMENT
            );
            DEFAULT_AGE_REQUIREMENT
        }),
    }
}
