//! Shared utilities and common types for the PhoneReserve server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Email and phone normalization, validation and log masking

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, MailConfig, ReportConfig, ServerConfig,
    VerificationLimits,
};
pub use utils::{email, phone};
