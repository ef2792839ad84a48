//! Health endpoint

use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health over the last hour
///
/// Answers 503 while the API is in WARNING or CRITICAL state so load
/// balancers and probes can react to it.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let health = state.monitor.get_health_status();
    debug!(status = %health.status, "Health check requested");

    let mut response = if health.status.is_unavailable() {
        HttpResponse::ServiceUnavailable()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(health))
}
