// src/config.rs

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub rust_log: String,
}

impl Config {
    /// Reads configuration from the environment. The caller is expected to
    /// have loaded any .env file first (main does, before anything else).
    pub fn from_env() -> Self {
        // mode=rwc creates the database file on first run
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:quizhub.db?mode=rwc".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            bind_addr,
            rust_log,
        }
    }
}
