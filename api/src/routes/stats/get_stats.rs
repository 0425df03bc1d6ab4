use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::StatsResponse;
use crate::handlers::handle_domain_error;

/// Handler for GET /api/stats
pub async fn get_stats(state: web::Data<AppState>) -> HttpResponse {
    match state.aggregator.collect().await {
        Ok(stats) => HttpResponse::Ok().json(StatsResponse {
            success: true,
            stats: stats.into(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
