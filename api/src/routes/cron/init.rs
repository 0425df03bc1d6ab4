use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::CronInitResponse;

/// Handler for GET /api/cron/init
///
/// Starts the report timer unless it already runs. Repeated calls are
/// harmless and report `started: false`.
pub async fn init(state: web::Data<AppState>) -> HttpResponse {
    let scheduler = &state.scheduler;
    let started = scheduler.ensure_started();

    let message = if started {
        "Stats report schedule started"
    } else {
        "Stats report schedule already running"
    };

    HttpResponse::Ok().json(CronInitResponse {
        message: message.to_string(),
        started,
        state: scheduler.state().as_str().to_string(),
        interval_hours: scheduler.interval_hours(),
        next_run: scheduler.next_run(),
    })
}
