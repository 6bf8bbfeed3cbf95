use dotenv::dotenv;
use std::env;

/// Runtime settings, loaded once at startup and shared with handlers via
/// `web::Data`.
pub struct Config {
    /// Store connection string (a SQLite path).
    pub database_uri: String,
    /// HS256 signing secret for identity tokens.
    pub secret: String,
    pub port: u16,
}

impl Config {
    /// Reads `.env` (if present) and the process environment. Every value
    /// has a development default so a bare checkout still starts.
    pub fn from_env() -> Self {
        dotenv().ok();
        Config {
            database_uri: env::var("URI").unwrap_or_else(|_| "tasks.db".to_string()),
            secret: env::var("SECRET").unwrap_or_else(|_| "your_jwt_secret".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }
}
