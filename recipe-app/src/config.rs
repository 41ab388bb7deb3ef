use crate::infrastructure::security::MIN_SECRET_LEN;
use recipe_errors::AppError;
use std::{env, fmt::Display, net::SocketAddr, str::FromStr};
use tracing::{info, warn};

/// One year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub token_secret: String,
    pub token_ttl_hours: i64,
    pub cors_origin: String,
    pub bootstrap: BootstrapSettings,
}

/// Accounts seeded at start-up.
#[derive(Debug, Clone, Default)]
pub struct BootstrapSettings {
    pub admin_username: String,
    pub admin_email: String,
    pub admin_password: Option<String>,
    pub cooks: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let token_secret = require("TOKEN_SECRET")?;
        if token_secret.len() < MIN_SECRET_LEN {
            warn!("TOKEN_SECRET is shorter than {MIN_SECRET_LEN} bytes");
            return Err(AppError::Config(format!(
                "TOKEN_SECRET must be at least {MIN_SECRET_LEN} bytes"
            )));
        }

        let token_ttl_hours = check_ttl(try_load("TOKEN_TTL_HOURS", "10")?)?;

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:8080")?,
            token_secret,
            token_ttl_hours,
            cors_origin: try_load("CORS_ORIGIN", "http://localhost:3000")?,
            bootstrap: BootstrapSettings {
                admin_username: try_load("ADMIN_USERNAME", "admin")?,
                admin_email: try_load("ADMIN_EMAIL", "admin@recipe.local")?,
                admin_password: env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
                cooks: parse_list(&env::var("BOOTSTRAP_COOKS").unwrap_or_default()),
            },
        })
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }
}

fn require(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found");
        AppError::Config(format!("{key} must be set"))
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            AppError::Config(format!("invalid {key}: {e}"))
        })
}

fn check_ttl(hours: i64) -> Result<i64, AppError> {
    if (1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        warn!("TOKEN_TTL_HOURS out of range: {hours}");
        Err(AppError::Config(format!(
            "TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}"
        )))
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
