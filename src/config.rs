// [library] Secrecy crate - keeps credentials out of Debug output and logs
// ExposeSecret trait allows controlled access to wrapped secret values
use secrecy::{ExposeSecret, Secret};

// [library] Serde deserialization so settings can also be loaded from structured sources
use serde::Deserialize;

// [rust] Standard library networking types for the listener address
use std::net::{IpAddr, Ipv4Addr};

// [business] Minimum signing key length accepted by the cookie crate (512 bits)
pub const MIN_SESSION_SECRET_LEN: usize = 64;

// [business] Database connection settings - the only options the pool recognizes
// are user, password, host and database; pool sizing is kept alongside them
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub user: String,             // [business] Role the application connects as
    pub password: Secret<String>, // [security] Never printed, even in Debug output
    pub host: String,             // [business] Hostname of the PostgreSQL server
    pub database: String,         // [business] Database name (e.g. "lightbnb")
    pub max_connections: u32,     // [business] Upper bound on pooled connections
}

impl DatabaseSettings {
    // [security] Controlled access to the database password
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

// [rust] Derive macros: Debug for logging (secrets stay redacted), Clone for axum state
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // [business] Network binding configuration - where the server listens
    pub app_host: IpAddr,
    pub app_port: u16,

    // [business] Connection pool settings
    pub database: DatabaseSettings,

    // [security] CORS allowed origins for credentialed browser requests
    pub allowed_origins: Vec<String>,

    // [security] Key material for signing the session cookie
    pub session_secret: Secret<String>,
}

impl Config {
    // [business] Factory method - builds Config from environment variables
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // [library] Load .env file if present - missing file is not an error
        dotenvy::dotenv().ok();

        let config = Config {
            app_host: std::env::var("APP_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string())
                .parse()
                .unwrap_or_else(|_| IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))), // [business] Fallback to IPv4 wildcard

            app_port: std::env::var("APP_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            // [business] Development defaults match the vagrant box used for local work
            database: DatabaseSettings {
                user: std::env::var("DB_USER").unwrap_or_else(|_| "vagrant".to_string()),
                password: Secret::new(
                    std::env::var("DB_PASSWORD").unwrap_or_else(|_| "123".to_string()),
                ),
                host: std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
                database: std::env::var("DB_NAME").unwrap_or_else(|_| "lightbnb".to_string()),
                max_connections: std::env::var("DB_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .unwrap_or(5),
            },

            // [security] Comma-separated list of origins allowed to send cookies
            allowed_origins: parse_origins(
                &std::env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),

            // [security] Session secret is REQUIRED - no default
            session_secret: Secret::new(
                std::env::var("SESSION_SECRET")
                    .map_err(|_| anyhow::anyhow!("SESSION_SECRET must be set"))?,
            ),
        };

        config.validate()?;

        // [library] Log the loaded configuration without any secret values
        tracing::info!(
            "Config loaded - Host: {}:{}, Database: {}@{}/{}, Pool size: {}",
            config.app_host,
            config.app_port,
            config.database.user,
            config.database.host,
            config.database.database,
            config.database.max_connections
        );

        Ok(config)
    }

    // [business] Reject settings the server cannot start with
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.session_secret.expose_secret().len() < MIN_SESSION_SECRET_LEN {
            anyhow::bail!(
                "SESSION_SECRET must be at least {} bytes long",
                MIN_SESSION_SECRET_LEN
            );
        }
        if self.database.max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be greater than zero");
        }
        Ok(())
    }

    // [business] Network bind address string for the TCP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }

    // [security] Session secret as bytes for the cookie signing key
    pub fn session_secret(&self) -> &[u8] {
        self.session_secret.expose_secret().as_bytes()
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
