//! HTTP API for the phone number reservation service
//!
//! Exposed as a library so integration tests can build the application
//! against in-memory repositories.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure, create_app, AppState};
