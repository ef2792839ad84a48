//! HTML dashboard

use crate::monitoring::ErrorRecord;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpResponse, Result as ActixResult, web};
use minijinja::{Environment, context};
use serde::Serialize;
use tracing::debug;

const TEMPLATE_NAME: &str = "dashboard.html";
const TEMPLATE_SOURCE: &str = include_str!("../../../templates/dashboard.html");

/// Window of the dashboard statistics
const DASHBOARD_HOURS: f64 = 24.0;

/// Longest error message shown in the recent errors table
const MESSAGE_PREVIEW_CHARS: usize = 100;

/// Configure dashboard routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(dashboard))
        .route("/dashboard", web::get().to(dashboard));
}

/// Template environment holding the dashboard.
///
/// The `.html` name turns on HTML auto-escaping, so method names and error
/// messages are rendered inert.
pub fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE_SOURCE)?;
    Ok(env)
}

/// One row of the recent errors table
#[derive(Debug, Serialize)]
struct ErrorRow {
    time: String,
    error_kind: String,
    method_name: String,
    message: String,
}

impl From<&ErrorRecord> for ErrorRow {
    fn from(error: &ErrorRecord) -> Self {
        Self {
            time: error.timestamp.format("%H:%M:%S").to_string(),
            error_kind: error.error_kind.to_string(),
            method_name: error.method_name.clone(),
            message: preview(&error.message),
        }
    }
}

fn preview(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(MESSAGE_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Render the dashboard page
pub fn render(state: &AppState) -> Result<String> {
    let stats = state.monitor.get_error_stats(DASHBOARD_HOURS);
    let health = state.monitor.get_health_status();
    let recent_errors: Vec<ErrorRow> = health.recent_errors.iter().map(ErrorRow::from).collect();

    let template = state.templates.get_template(TEMPLATE_NAME)?;
    let html = template.render(context! {
        refresh_seconds => state.config.monitoring().dashboard_refresh_seconds,
        generated_at => chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        stats => stats,
        health => health,
        recent_errors => recent_errors,
    })?;
    Ok(html)
}

async fn dashboard(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Dashboard requested");

    let html = render(&state)?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
