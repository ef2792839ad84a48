//! actix-web server exposing one recorder over HTTP

use crate::config::{Config, CorsConfig, ServerConfig, Validate};
use crate::monitoring::ApiMonitor;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{MonitorError, Result};
use actix_cors::Cors;
use actix_web::http::{Method, header::HeaderName};
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Metrics server bound to a single [`ApiMonitor`]
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    /// Server with a fresh recorder built from `config.monitoring`
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        Ok(Self {
            config: config.server().clone(),
            state: AppState::from_config(config.clone())?,
        })
    }

    /// Server publishing a recorder the application already writes to
    pub fn with_monitor(config: &Config, monitor: Arc<ApiMonitor>) -> Result<Self> {
        info!("Creating HTTP server for shared monitor");

        Ok(Self {
            config: config.server().clone(),
            state: AppState::new(config.clone(), monitor)?,
        })
    }

    /// Application factory shared by `start` and the route tests
    pub(crate) fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = cors_middleware(&state.config.server().cors);

        App::new()
            .app_data(state)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "telegram-api-monitor")))
            .configure(routes::configure_routes)
    }

    /// Bind and serve until the actix system shuts down
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;
        let workers = self.config.worker_count();

        info!(workers, "Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| MonitorError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

fn cors_middleware(settings: &CorsConfig) -> Cors {
    if !settings.enabled {
        return Cors::default();
    }
    if let Err(e) = settings.validate() {
        warn!(error = %e, "Ignoring invalid CORS entries");
    }

    let mut cors = if settings.allows_all_origins() {
        Cors::default().allow_any_origin()
    } else {
        settings
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    let methods: Vec<Method> = settings
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    let headers: Vec<HeaderName> = settings
        .allowed_headers
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();
    if !headers.is_empty() {
        cors = cors.allowed_headers(headers);
    }

    cors.max_age(settings.max_age as usize)
}
