//! Prometheus, flat-key and file exports

use super::helpers::window_from_hours;
use super::monitor::ApiMonitor;
use super::stats::{ONE_HOUR, summarize_window};
use crate::monitoring::types::{ExportFormat, FlatValue, MethodTally, StatsReport};
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Window of the JSON file export
const FILE_EXPORT_HOURS: f64 = 24.0;

impl ApiMonitor {
    /// Export the last hour in Prometheus text exposition format.
    ///
    /// Scalars and error codes cover the one-hour window; the per-method series
    /// come from the lifetime tally. Both are read under one lock acquisition.
    pub fn export_prometheus(&self) -> String {
        let (stats, methods) = match self.read_storage() {
            Some(storage) => {
                let stats = summarize_window(
                    &storage,
                    Instant::now(),
                    window_from_hours(ONE_HOUR),
                    ONE_HOUR,
                );
                let methods: BTreeMap<String, MethodTally> = storage
                    .method_tally
                    .iter()
                    .map(|(method, tally)| (method.clone(), *tally))
                    .collect();
                (stats, methods)
            }
            None => (StatsReport::neutral(ONE_HOUR), BTreeMap::new()),
        };

        let mut output = String::new();

        push_scalar(
            &mut output,
            "telegram_api_calls_total",
            "Total Telegram API calls in the last hour",
            "gauge",
            stats.total_calls,
        );
        push_scalar(
            &mut output,
            "telegram_api_errors_total",
            "Total Telegram API errors in the last hour",
            "gauge",
            stats.total_errors,
        );
        push_scalar(
            &mut output,
            "telegram_api_success_rate",
            "Percentage of successful calls in the last hour",
            "gauge",
            format!("{:.2}", stats.success_rate),
        );
        push_scalar(
            &mut output,
            "telegram_api_error_rate",
            "Percentage of failed calls in the last hour",
            "gauge",
            format!("{:.2}", stats.error_rate),
        );

        let categories = stats.categories;
        for (name, help, value) in [
            ("telegram_api_4xx_errors_total", "Errors with a 4xx status code", categories.http_4xx),
            ("telegram_api_5xx_errors_total", "Errors with a 5xx status code", categories.http_5xx),
            ("telegram_api_network_errors_total", "Network errors", categories.network),
            ("telegram_api_timeout_errors_total", "Timed out calls", categories.timeout),
            ("telegram_api_rate_limit_errors_total", "Rate limited calls", categories.rate_limit),
        ] {
            push_scalar(&mut output, name, help, "gauge", value);
        }

        output.push_str("# HELP telegram_api_method_calls_total Calls per API method and outcome\n");
        output.push_str("# TYPE telegram_api_method_calls_total counter\n");
        for (method, tally) in &methods {
            let method = escape_label(method);
            output.push_str(&format!(
                "telegram_api_method_calls_total{{method=\"{}\",status=\"success\"}} {}\n",
                method, tally.success
            ));
            output.push_str(&format!(
                "telegram_api_method_calls_total{{method=\"{}\",status=\"error\"}} {}\n",
                method, tally.error
            ));
        }

        output.push_str("# HELP telegram_api_error_code_total Errors per status code in the last hour\n");
        output.push_str("# TYPE telegram_api_error_code_total gauge\n");
        for (code, count) in &stats.errors_by_code {
            output.push_str(&format!(
                "telegram_api_error_code_total{{code=\"{}\"}} {}\n",
                code, count
            ));
        }

        output
    }

    /// Export the last hour as nine flat dotted keys
    pub fn export_flat_keys(&self) -> BTreeMap<String, FlatValue> {
        let stats = self.get_error_stats(ONE_HOUR);
        let categories = stats.categories;

        [
            ("telegram.api.calls.total", FlatValue::Count(stats.total_calls)),
            ("telegram.api.errors.total", FlatValue::Count(stats.total_errors)),
            ("telegram.api.success.rate", FlatValue::Rate(stats.success_rate)),
            ("telegram.api.error.rate", FlatValue::Rate(stats.error_rate)),
            ("telegram.api.4xx.errors", FlatValue::Count(categories.http_4xx)),
            ("telegram.api.5xx.errors", FlatValue::Count(categories.http_5xx)),
            ("telegram.api.network.errors", FlatValue::Count(categories.network)),
            ("telegram.api.timeout.errors", FlatValue::Count(categories.timeout)),
            ("telegram.api.rate_limit.errors", FlatValue::Count(categories.rate_limit)),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
    }

    /// Write one export to `path`. Write failures are returned, never retried.
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P, format: ExportFormat) -> Result<()> {
        let path = path.as_ref();

        let content = match format {
            ExportFormat::Json => {
                serde_json::to_string_pretty(&self.get_error_stats(FILE_EXPORT_HOURS))?
            }
            ExportFormat::Prometheus => self.export_prometheus(),
            ExportFormat::Zabbix => serde_json::to_string_pretty(&self.export_flat_keys())?,
        };

        std::fs::write(path, content)?;

        info!(
            target: "telegram_monitoring",
            path = %path.display(),
            %format,
            "Metrics exported"
        );
        Ok(())
    }
}

fn push_scalar<V: std::fmt::Display>(
    output: &mut String,
    name: &str,
    help: &str,
    kind: &str,
    value: V,
) {
    output.push_str(&format!("# HELP {} {}\n", name, help));
    output.push_str(&format!("# TYPE {} {}\n", name, kind));
    output.push_str(&format!("{} {}\n", name, value));
}

/// Escape a label value for the text exposition format
fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
