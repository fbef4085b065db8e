// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Number of questions served when the caller does not ask for a specific amount.
pub const DEFAULT_QUIZ_LIMIT: i64 = 10;

/// Attempt history page size when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: i64 = 20;
pub const MAX_HISTORY_LIMIT: i64 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Reads configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| format!("PORT must be a valid port number: {}", e))?,
            Err(_) => 8081,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            rust_log,
            port,
        })
    }
}
