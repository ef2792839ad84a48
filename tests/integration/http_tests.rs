//! HTTP route integration tests
//!
//! Routes are mounted on a bare actix App sharing one recorder with the test.

#[cfg(test)]
mod tests {
    use crate::common::{ErrorFactory, Traffic};
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use std::sync::Arc;
    use telegram_api_monitor::config::Config;
    use telegram_api_monitor::server::AppState;
    use telegram_api_monitor::server::routes::{self, metrics::PROMETHEUS_CONTENT_TYPE};
    use telegram_api_monitor::ApiMonitor;

    fn state(monitor: &Arc<ApiMonitor>, config: Config) -> web::Data<AppState> {
        web::Data::new(AppState::new(config, Arc::clone(monitor)).unwrap())
    }

    #[actix_web::test]
    async fn test_routes_share_live_recorder() {
        let monitor = Arc::new(ApiMonitor::default());
        let app = test::init_service(
            App::new()
                .app_data(state(&monitor, Config::default()))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/metrics/json").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_calls"], 0);
        assert_eq!(body["success_rate"], 100.0);

        // Traffic recorded after startup is visible on the next scrape
        Traffic::new(&monitor, "sendMessage")
            .succeed(1)
            .fail(&ErrorFactory::timed_out());

        let req = test::TestRequest::get().uri("/metrics/json").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_calls"], 2);
        assert_eq!(body["timeout_errors"], 1);
    }

    #[actix_web::test]
    async fn test_metrics_content_type() {
        let monitor = Arc::new(ApiMonitor::default());
        let app = test::init_service(
            App::new()
                .app_data(state(&monitor, Config::default()))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            PROMETHEUS_CONTENT_TYPE
        );
    }

    #[actix_web::test]
    async fn test_health_flips_to_unavailable() {
        let monitor = Arc::new(ApiMonitor::default());
        let app = test::init_service(
            App::new()
                .app_data(state(&monitor, Config::default()))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        Traffic::new(&monitor, "setChatPermissions").fail(&ErrorFactory::bot_blocked());

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "CRITICAL");
        assert_eq!(body["recent_errors"][0]["method_name"], "setChatPermissions");
    }

    #[actix_web::test]
    async fn test_dashboard_uses_configured_refresh() {
        let monitor = Arc::new(ApiMonitor::default());
        let mut config = Config::default();
        config.monitoring.dashboard_refresh_seconds = 15;
        let app = test::init_service(
            App::new()
                .app_data(state(&monitor, config))
                .configure(routes::configure_routes),
        )
        .await;

        Traffic::new(&monitor, "sendMessage").fail(&ErrorFactory::chat_not_found());

        let req = test::TestRequest::get().uri("/dashboard").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            resp.headers()
                .get(header::CONTENT_TYPE)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );

        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("content=\"15\""));
        assert!(html.contains("sendMessage"));
        assert!(html.contains("Bad Request: chat not found"));
    }

    #[actix_web::test]
    async fn test_unknown_route_is_not_found() {
        let monitor = Arc::new(ApiMonitor::default());
        let app = test::init_service(
            App::new()
                .app_data(state(&monitor, Config::default()))
                .configure(routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/metrics/xml").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
