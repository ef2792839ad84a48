//! Recorder integration tests
//!
//! Statistics, health and retention as seen through the public API.

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::common::{ErrorFactory, StatsAssertions, Traffic};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;
    use telegram_api_monitor::{ApiMonitor, HealthLevel};

    // ==================== Statistics ====================

    #[test]
    fn test_empty_recorder() {
        let monitor = ApiMonitor::default();
        monitor.get_error_stats(1.0).assert_neutral();
        monitor.get_error_stats(24.0).assert_neutral();
    }

    #[test]
    fn test_successful_calls_report_full_success() {
        let monitor = ApiMonitor::default();
        Traffic::new(&monitor, "sendMessage").succeed(25);

        let stats = monitor.get_error_stats(24.0);
        assert_eq!(stats.total_calls, 25);
        assert_eq!(stats.total_errors, 0);
        assert_eq!(stats.success_rate, 100.0);
        stats.assert_consistent_rates();
    }

    #[test]
    fn test_mixed_traffic_breakdowns() {
        let monitor = ApiMonitor::default();
        Traffic::new(&monitor, "sendMessage")
            .chat(-1001)
            .succeed(10)
            .fail(&ErrorFactory::chat_not_found())
            .fail(&ErrorFactory::bad_gateway());
        Traffic::new(&monitor, "getChatMember")
            .succeed(5)
            .fail(&ErrorFactory::bot_blocked())
            .fail(&ErrorFactory::timed_out());

        let stats = monitor.get_error_stats(1.0);
        assert_eq!(stats.total_calls, 19);
        assert_eq!(stats.total_errors, 4);
        stats.assert_consistent_rates();

        assert_eq!(stats.errors_by_method["sendMessage"], 2);
        assert_eq!(stats.errors_by_method["getChatMember"], 2);
        assert_eq!(stats.errors_by_type["BadRequest"], 1);
        assert_eq!(stats.errors_by_type["Forbidden"], 1);
        assert_eq!(stats.errors_by_type["NetworkError"], 1);
        assert_eq!(stats.errors_by_type["TimedOut"], 1);
        assert_eq!(stats.errors_by_code.len(), 3);

        assert_eq!(stats.categories.http_4xx, 2);
        assert_eq!(stats.categories.http_5xx, 1);
        assert_eq!(stats.categories.network, 1);
        assert_eq!(stats.categories.timeout, 1);
        assert_eq!(stats.categories.rate_limit, 0);
    }

    #[test]
    fn test_windowed_and_lifetime_counters_diverge() {
        let monitor = ApiMonitor::default();
        let traffic = Traffic::new(&monitor, "sendMessage");
        traffic
            .fail(&ErrorFactory::flood_wait())
            .fail(&ErrorFactory::internal_server_error())
            .fail(&ErrorFactory::conflict());

        let windowed = monitor.get_error_stats(1.0).categories;
        assert_eq!(windowed.http_4xx, 2);
        assert_eq!(windowed.rate_limit, 1);
        assert_eq!(windowed.http_5xx, 1);
        assert_eq!(windowed.network, 1);

        let lifetime = monitor.lifetime_totals().counters;
        assert_eq!(lifetime.http_4xx, 1);
        assert_eq!(lifetime.rate_limit, 0);
        assert_eq!(lifetime.http_5xx, 1);
        assert_eq!(lifetime.network, 1);
    }

    #[test]
    fn test_rate_limit_through_status_mapping() {
        let monitor = ApiMonitor::default();
        let error = telegram_api_monitor::ApiError::from_status(429, "retry after 7");
        Traffic::new(&monitor, "sendMessage").fail(&error);

        assert_eq!(monitor.get_error_stats(1.0).categories.rate_limit, 1);
        let lifetime = monitor.lifetime_totals().counters;
        assert_eq!(lifetime.rate_limit, 1);
        assert_eq!(lifetime.http_4xx, 1);
    }

    #[test]
    fn test_latency_statistics() {
        let monitor = ApiMonitor::default();
        Traffic::new(&monitor, "getUpdates")
            .latency(Duration::from_millis(100))
            .succeed(19);
        Traffic::new(&monitor, "getUpdates")
            .latency(Duration::from_millis(2100))
            .succeed(1);

        let stats = monitor.get_error_stats(1.0);
        assert_approx_eq!(stats.avg_latency_ms, 200.0, 0.01);
        assert!(stats.p95_latency_ms >= 100.0);
        assert!(stats.p95_latency_ms <= 2100.0);
    }

    // ==================== Health ====================

    #[test]
    fn test_health_thresholds() {
        let scenarios = [
            (0, HealthLevel::Healthy),
            (1, HealthLevel::Healthy),
            (2, HealthLevel::Degraded),
            (4, HealthLevel::Degraded),
            (5, HealthLevel::Warning),
            (10, HealthLevel::Warning),
            (11, HealthLevel::Critical),
        ];

        for (failures, expected) in scenarios {
            let monitor = ApiMonitor::default();
            let traffic = Traffic::new(&monitor, "sendMessage");
            traffic.succeed(20 - failures);
            for _ in 0..failures {
                traffic.fail(&ErrorFactory::bad_gateway());
            }

            let health = monitor.get_health_status();
            assert_eq!(health.status, expected, "{} failures in 20 calls", failures);
            assert_eq!(health.total_calls, 20);
        }
    }

    #[test]
    fn test_health_serializes_status_and_recent_errors() {
        let monitor = ApiMonitor::default();
        let traffic = Traffic::new(&monitor, "deleteMessage").chat(-42);
        for _ in 0..8 {
            traffic.fail(&ErrorFactory::chat_not_found());
        }

        let health = monitor.get_health_status();
        let value = serde_json::to_value(&health).unwrap();
        assert_eq!(value["status"], "CRITICAL");
        assert_eq!(value["recent_errors"].as_array().unwrap().len(), 5);
        assert_eq!(value["recent_errors"][0]["error_kind"], "BadRequest");
        assert_eq!(value["recent_errors"][0]["status_code"], 400);
        assert_eq!(value["recent_errors"][0]["chat_id"], -42);
        assert!(value["last_check"].is_string());
    }

    // ==================== Retention ====================

    #[test]
    fn test_sub_second_horizon_evicts_lazily() {
        let monitor = ApiMonitor::new(Duration::from_millis(50));
        Traffic::new(&monitor, "getMe")
            .succeed(3)
            .fail(&ErrorFactory::timed_out());
        assert_eq!(monitor.window_len(), (4, 1));

        thread::sleep(Duration::from_millis(120));
        // Queries filter by time even before eviction runs
        monitor.get_error_stats(1.0 / 3600.0 / 100.0).assert_neutral();
        assert_eq!(monitor.window_len(), (4, 1));

        Traffic::new(&monitor, "getMe").succeed(1);
        assert_eq!(monitor.window_len(), (1, 0));
        assert_eq!(monitor.get_error_stats(1.0).total_calls, 1);
        assert_eq!(monitor.recent_errors().len(), 1);
    }

    #[test]
    fn test_ring_bounded_under_load() {
        let monitor = ApiMonitor::default();
        let traffic = Traffic::new(&monitor, "sendMessage");
        for _ in 0..250 {
            traffic.fail(&ErrorFactory::bot_blocked());
        }

        assert_eq!(
            monitor.recent_errors().len(),
            telegram_api_monitor::monitoring::RECENT_ERRORS_CAPACITY
        );
        assert_eq!(monitor.get_health_status().recent_errors.len(), 5);
        assert_eq!(monitor.get_error_stats(1.0).total_errors, 250);
    }

    // ==================== Concurrency ====================

    #[test]
    fn test_concurrent_writers_and_readers() {
        let monitor = Arc::new(ApiMonitor::default());

        let writers: Vec<_> = (0..4)
            .map(|_| {
                let monitor = Arc::clone(&monitor);
                thread::spawn(move || {
                    let traffic = Traffic::new(&monitor, "sendMessage");
                    for _ in 0..100 {
                        traffic.succeed(3).fail(&ErrorFactory::bad_gateway());
                    }
                })
            })
            .collect();

        let reader = {
            let monitor = Arc::clone(&monitor);
            thread::spawn(move || {
                for _ in 0..50 {
                    let stats = monitor.get_error_stats(1.0);
                    assert!(stats.total_errors <= stats.total_calls);
                    let _ = monitor.get_health_status();
                    let _ = monitor.export_flat_keys();
                }
            })
        };

        for writer in writers {
            writer.join().unwrap();
        }
        reader.join().unwrap();

        let stats = monitor.get_error_stats(1.0);
        assert_eq!(stats.total_calls, 1600);
        assert_eq!(stats.total_errors, 400);
        assert_eq!(stats.error_rate, 25.0);
        assert_eq!(monitor.get_health_status().status, HealthLevel::Warning);
    }
}
