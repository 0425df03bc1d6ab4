pub mod cors;
pub mod cron_auth;

pub use cors::create_cors;
pub use cron_auth::CronAuth;
