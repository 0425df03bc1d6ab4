use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::SendStatsResponse;
use crate::handlers::handle_domain_error;

/// Handler for GET /api/stats/send-now and GET /api/cron/send-stats
///
/// Aggregates and emails one report immediately. A failed send answers 500
/// but still carries the stats.
pub async fn send_stats_now(state: web::Data<AppState>) -> HttpResponse {
    let delivery = match state.reporter.send_report().await {
        Ok(delivery) => delivery,
        Err(error) => return handle_domain_error(&error),
    };

    if delivery.is_sent() {
        HttpResponse::Ok().json(SendStatsResponse {
            success: true,
            message: "Stats email sent successfully".to_string(),
            sent_to: delivery.recipient,
            message_id: delivery.message_id,
            error: None,
            stats: delivery.stats.into(),
        })
    } else {
        HttpResponse::InternalServerError().json(SendStatsResponse {
            success: false,
            message: "Failed to send stats email".to_string(),
            sent_to: delivery.recipient,
            message_id: None,
            error: delivery.error,
            stats: delivery.stats.into(),
        })
    }
}
