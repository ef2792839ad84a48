//! Metrics export endpoints

use crate::server::state::AppState;
use crate::utils::error::MonitorError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use tracing::debug;

/// Content type of the Prometheus text exposition format
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Configure metrics routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/metrics")
            .route("", web::get().to(prometheus_metrics))
            .route("/json", web::get().to(json_metrics))
            .route("/zabbix", web::get().to(zabbix_metrics)),
    );
}

/// Query parameters of `/metrics/json`
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Window length in hours, one hour when absent
    pub hours: Option<f64>,
}

impl StatsQuery {
    fn window_hours(&self) -> Result<f64, MonitorError> {
        match self.hours {
            None => Ok(1.0),
            Some(hours) if hours.is_finite() && hours > 0.0 => Ok(hours),
            Some(hours) => Err(MonitorError::bad_request(format!(
                "hours must be a positive number, got {}",
                hours
            ))),
        }
    }
}

async fn prometheus_metrics(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Prometheus metrics requested");

    Ok(HttpResponse::Ok()
        .content_type(PROMETHEUS_CONTENT_TYPE)
        .body(state.monitor.export_prometheus()))
}

async fn json_metrics(
    state: web::Data<AppState>,
    query: web::Query<StatsQuery>,
) -> ActixResult<HttpResponse> {
    let hours = query.window_hours()?;
    debug!(hours, "JSON metrics requested");

    Ok(HttpResponse::Ok().json(state.monitor.get_error_stats(hours)))
}

async fn zabbix_metrics(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Zabbix metrics requested");

    Ok(HttpResponse::Ok().json(state.monitor.export_flat_keys()))
}
