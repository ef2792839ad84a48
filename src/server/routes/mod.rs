//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod dashboard;
pub mod health;
pub mod metrics;

use actix_web::web;

/// Register every route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(metrics::configure_routes)
        .configure(health::configure_routes)
        .configure(dashboard::configure_routes);
}
