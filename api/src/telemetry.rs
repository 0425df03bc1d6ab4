//! Tracing subscriber setup

use pr_shared::Environment;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber
///
/// `RUST_LOG` overrides the environment's default filter.
pub fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.default_log_filter()));

    let registry = tracing_subscriber::registry().with(filter);

    if environment.is_production() {
        registry.with(fmt::layer().with_target(false).compact()).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
