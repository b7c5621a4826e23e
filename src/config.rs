// src/config.rs

use std::env;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub rust_log: String,
    /// Address the HTTP server binds to.
    pub server_addr: String,
    /// Frontend origin allowed by CORS.
    pub cors_origin: String,
    /// Optional prefix the whole API is also mounted under (e.g. `/tyasacademy`).
    pub api_base_path: String,
    pub log_dir: String,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let server_addr = env::var("SERVER_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        let cors_origin = env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let api_base_path = env::var("API_BASE_PATH")
            .map(|p| normalize_base_path(&p))
            .unwrap_or_default();

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Self {
            database_url,
            jwt_secret,
            rust_log,
            server_addr,
            cors_origin,
            api_base_path,
            log_dir,
            db_max_connections,
        }
    }
}

/// Turns `tyasacademy/`, `/tyasacademy/` or `/tyasacademy` into `/tyasacademy`.
/// An empty or root-only value disables the prefix.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
