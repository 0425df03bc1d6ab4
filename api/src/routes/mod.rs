//! HTTP route handlers

pub mod cron;
pub mod health;
pub mod mail;
pub mod reservation;
pub mod stats;
