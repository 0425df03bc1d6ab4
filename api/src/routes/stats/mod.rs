//! Stats read-out and report dispatch endpoints

pub mod get_stats;
pub mod send_now;

pub use get_stats::get_stats;
pub use send_now::send_stats_now;
