use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;

use pr_api::{create_app, telemetry, AppState};
use pr_core::services::{
    AttemptCleanupConfig, AttemptCleanupService, Clock, SystemClock,
};
use pr_infra::database::{DatabasePool, MySqlAttemptRepository, MySqlReservationRepository};
use pr_infra::mail::create_mail_service;
use pr_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(config.environment);

    tracing::info!(environment = %config.environment, "Starting phone reservation API");

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    pool.run_migrations()
        .await
        .context("failed to apply database migrations")?;
    tracing::info!("{}", pool.get_statistics());

    let reservations = Arc::new(MySqlReservationRepository::new(pool.get_pool().clone()));
    let attempts = Arc::new(MySqlAttemptRepository::new(pool.get_pool().clone()));
    let mailer = create_mail_service(&config.mail, config.environment);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let state = web::Data::new(AppState::new(
        reservations,
        attempts.clone(),
        mailer,
        clock.clone(),
        &config,
    ));

    let cleanup = Arc::new(AttemptCleanupService::new(
        attempts,
        clock,
        AttemptCleanupConfig {
            ttl: chrono::Duration::hours(config.limits.attempt_ttl_hours),
            ..AttemptCleanupConfig::default()
        },
    ));
    cleanup.start_background_task();

    if config.report.start_on_boot {
        let scheduler = state.scheduler.clone();
        let delay = Duration::from_secs(config.report.boot_delay_secs);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            scheduler.ensure_started();
        });
    }

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &app_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    Ok(())
}
