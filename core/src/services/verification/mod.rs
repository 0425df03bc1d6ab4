//! Email code verification with a failed-attempt ledger
//!
//! This module provides the verification workflow:
//! - Lockout after repeated failures per email/IP pair
//! - Constant-time code comparison and code expiry
//! - Background purge of expired ledger entries

mod cleanup;
mod config;
mod ledger;
mod service;
mod types;


pub use cleanup::{AttemptCleanupConfig, AttemptCleanupService, CleanupResult};
pub use config::VerificationServiceConfig;
pub use ledger::AttemptLedger;
pub use service::VerificationService;
pub use types::VerifyRequest;
