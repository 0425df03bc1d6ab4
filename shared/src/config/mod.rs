//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - MySQL connection and pool configuration
//! - `environment` - Environment detection
//! - `mail` - SMTP credentials and sender identity
//! - `rate_limit` - Verification attempt limits and lockout windows
//! - `report` - Periodic stats report schedule and recipient
//! - `server` - HTTP server and CORS configuration

pub mod database;
pub mod environment;
pub mod mail;
pub mod rate_limit;
pub mod report;
pub mod server;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use environment::Environment;
pub use mail::MailConfig;
pub use rate_limit::VerificationLimits;
pub use report::ReportConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Outbound mail configuration
    pub mail: MailConfig,

    /// Stats report configuration
    pub report: ReportConfig,

    /// Verification attempt limits
    #[serde(default)]
    pub limits: VerificationLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            mail: MailConfig::default(),
            report: ReportConfig::default(),
            limits: VerificationLimits::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            mail: MailConfig::from_env(),
            report: ReportConfig::from_env(),
            limits: VerificationLimits::from_env(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

/// Read an environment variable and parse it, falling back to a default
/// when it is missing or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
