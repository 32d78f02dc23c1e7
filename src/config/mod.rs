use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub reporting: ReportingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub rate_limit_per_minute: u32,
    pub cors_allowed_origins: Vec<String>,
}

/// Reporting window limits for the split dashboard
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Length of the trailing window used when no dates are requested
    pub window_days: u32,
    /// Longest explicit date range a report may cover
    pub max_range_days: u32,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            max_range_days: 366,
        }
    }
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            security: SecurityConfig {
                rate_limit_per_minute: parse_var("RATE_LIMIT_PER_MINUTE", 1000)?,
                cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .map(|origins| parse_origins(&origins))
                    .unwrap_or_default(),
            },
            reporting: ReportingConfig {
                window_days: parse_var("REPORT_WINDOW_DAYS", 30)?,
                max_range_days: parse_var("REPORT_MAX_RANGE_DAYS", 366)?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.security.rate_limit_per_minute == 0 {
            return Err(AppError::Configuration(
                "Rate limit must be greater than 0".to_string(),
            ));
        }

        if self.reporting.window_days == 0 {
            return Err(AppError::Configuration(
                "Report window must be at least 1 day".to_string(),
            ));
        }

        if self.reporting.window_days > self.reporting.max_range_days {
            return Err(AppError::Configuration(format!(
                "Report window ({} days) exceeds maximum range ({} days)",
                self.reporting.window_days, self.reporting.max_range_days
            )));
        }

        Ok(())
    }
}

/// Read a numeric variable, falling back to `default` when unset
pub(crate) fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", name))),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
