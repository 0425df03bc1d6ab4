//! Application state and factory
//!
//! This module wires the core services into shared state and builds the
//! Actix-web application around them.

use actix_web::{web, App, HttpResponse};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use pr_core::repositories::{AttemptRepository, ReservationRepository};
use pr_core::services::{
    Clock, MailDiagnostics, MailServiceTrait, ReportScheduler, ReservationService, ReservationServiceConfig,
    StatsAggregator, StatsReporter, VerificationService, VerificationServiceConfig,
};
use pr_shared::{AppConfig, MailConfig};

use crate::dto::ErrorResponse;
use crate::handlers::json_error_handler;
use crate::middleware::{create_cors, CronAuth};
use crate::routes;

/// Services shared by every request handler
pub struct AppState {
    pub reservation_service: Arc<ReservationService>,
    pub verification_service: Arc<VerificationService>,
    pub aggregator: Arc<StatsAggregator>,
    pub reporter: Arc<StatsReporter>,
    pub scheduler: Arc<ReportScheduler>,
    pub mail_diagnostics: Arc<MailDiagnostics>,
    /// Credential presence is reported by the diagnostics endpoint
    pub mail_config: MailConfig,
}

impl AppState {
    /// Build every service from the storage and mail seams
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        attempts: Arc<dyn AttemptRepository>,
        mailer: Arc<dyn MailServiceTrait>,
        clock: Arc<dyn Clock>,
        config: &AppConfig,
    ) -> Self {
        let reservation_service = Arc::new(ReservationService::new(
            reservations.clone(),
            mailer.clone(),
            clock.clone(),
            ReservationServiceConfig {
                code_validity_hours: config.limits.code_validity_hours,
                ..ReservationServiceConfig::default()
            },
        ));

        let verification_service = Arc::new(VerificationService::new(
            reservations.clone(),
            attempts,
            clock.clone(),
            VerificationServiceConfig::from(config.limits),
        ));

        let mail_diagnostics = Arc::new(MailDiagnostics::new(
            mailer.clone(),
            clock.clone(),
            config.limits.code_validity_hours,
        ));

        let aggregator = Arc::new(StatsAggregator::new(reservations, clock.clone()));
        let reporter = Arc::new(StatsReporter::new(
            aggregator.clone(),
            mailer,
            config.report.recipient.clone(),
        ));
        let scheduler = Arc::new(ReportScheduler::new(
            reporter.clone(),
            clock,
            config.report.interval_hours,
        ));

        Self {
            reservation_service,
            verification_service,
            aggregator,
            reporter,
            scheduler,
            mail_diagnostics,
            mail_config: config.mail.clone(),
        }
    }
}

/// Register every route on a service config
///
/// `admin_secret` guards the report, cron and mail test endpoints when set.
pub fn configure(cfg: &mut web::ServiceConfig, admin_secret: Option<String>) {
    let guard = CronAuth::new(admin_secret);

    cfg.route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api")
                .route("/reserve", web::post().to(routes::reservation::reserve))
                .route("/verify", web::post().to(routes::reservation::verify))
                .route("/stats", web::get().to(routes::stats::get_stats))
                .service(
                    web::resource("/stats/send-now")
                        .wrap(guard.clone())
                        .route(web::get().to(routes::stats::send_stats_now)),
                )
                .service(
                    web::resource("/test-email")
                        .wrap(guard.clone())
                        .route(web::post().to(routes::mail::send_test_email)),
                )
                .service(
                    web::scope("/cron")
                        .wrap(guard)
                        .route("/init", web::get().to(routes::cron::init))
                        .route("/send-stats", web::get().to(routes::stats::send_stats_now)),
                ),
        );
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    config: &AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let admin_secret = config.server.admin_secret.clone();
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(state)
        .app_data(json_config)
        .wrap(create_cors(config.environment, &config.server))
        .wrap(TracingLogger::default())
        .configure(|cfg| configure(cfg, admin_secret))
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new("not_found", "The requested resource was not found")
        .to_response(actix_web::http::StatusCode::NOT_FOUND)
}
