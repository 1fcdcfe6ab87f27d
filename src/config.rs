use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database: DatabaseConfig,

    // JWT
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,

    // Server
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

/// Connection settings for the PostgreSQL pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Log every SQL statement
    pub echo: bool,
    /// Fixed number of pooled connections
    pub pool_size: u32,
    /// Connections older than this are closed and replaced
    pub recycle_after: Duration,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub const DEFAULT_POOL_SIZE: u32 = 10;
    pub const DEFAULT_RECYCLE_SECONDS: u64 = 3600;

    /// Settings with the default pool shape for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            echo: false,
            pool_size: Self::DEFAULT_POOL_SIZE,
            recycle_after: Duration::from_secs(Self::DEFAULT_RECYCLE_SECONDS),
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    fn from_env() -> Result<Self, ConfigError> {
        let url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => postgres_url_from_parts(),
        };

        let echo = env::var("DATABASE_ECHO")
            .or_else(|_| env::var("POSTGRES_ECHO"))
            .map(|value| parse_bool(&value).ok_or(ConfigError::Invalid("DATABASE_ECHO")))
            .unwrap_or(Ok(false))?;

        let pool_size = env::var("DATABASE_POOL_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_POOL_SIZE.to_string())
            .parse::<u32>()
            .ok()
            .filter(|size| *size > 0)
            .ok_or(ConfigError::Invalid("DATABASE_POOL_SIZE"))?;

        let recycle_seconds = env::var("DATABASE_RECYCLE_SECONDS")
            .unwrap_or_else(|_| Self::DEFAULT_RECYCLE_SECONDS.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid("DATABASE_RECYCLE_SECONDS"))?;

        Ok(Self {
            url,
            echo,
            pool_size,
            recycle_after: Duration::from_secs(recycle_seconds),
            acquire_timeout: Duration::from_secs(30),
        })
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Ok(Self {
            database: DatabaseConfig::from_env()?,

            // JWT
            jwt_secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("JWT_EXPIRATION_HOURS"))?,

            // Server
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8008".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Build a connection string from the individual `POSTGRES_*` variables
fn postgres_url_from_parts() -> String {
    let part = |name: &str, default: &str| env::var(name).unwrap_or_else(|_| default.to_string());

    format!(
        "{}://{}:{}@{}/{}",
        part("POSTGRES_DRIVER", "postgres"),
        part("POSTGRES_USER", "postgres"),
        part("POSTGRES_PASSWORD", "postgres"),
        part("POSTGRES_HOST", "localhost"),
        part("POSTGRES_DB", "postgres"),
    )
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}
