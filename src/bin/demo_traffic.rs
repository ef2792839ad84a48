//! Demo traffic generator
//!
//! Feeds a recorder with simulated Bot API calls and errors, prints the
//! resulting statistics, writes the three exports and optionally serves them.

use anyhow::Context;
use clap::Parser;
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use telegram_api_monitor::server::{self, ServerBuilder};
use telegram_api_monitor::{ApiError, ApiMonitor, ExportFormat};
use tracing::info;

const METHODS: &[&str] = &[
    "sendMessage",
    "getChatMember",
    "setChatPermissions",
    "deleteMessage",
    "editMessageText",
];

#[derive(Parser, Debug)]
#[command(name = "demo-traffic", version, about = "Simulate Telegram API traffic")]
struct Args {
    /// Number of simulated calls
    #[arg(long, default_value_t = 100)]
    calls: usize,

    /// Share of calls that succeed, between 0 and 1
    #[arg(long, default_value_t = 0.8, value_parser = parse_ratio)]
    success_ratio: f64,

    /// Pause between calls in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Directory receiving the export files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Keep serving the recorded traffic over HTTP afterwards
    #[arg(long)]
    serve: bool,

    /// Configuration file used with --serve
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_ratio(value: &str) -> Result<f64, String> {
    let ratio: f64 = value
        .parse()
        .map_err(|e| format!("`{}` is not a number: {}", value, e))?;
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("`{}` is not between 0 and 1", value))
    }
}

fn random_error(rng: &mut impl Rng) -> ApiError {
    match rng.gen_range(0..6) {
        0 => ApiError::bad_request("Bad Request: message not found").with_status(400),
        1 => ApiError::forbidden("Forbidden: bot was blocked by the user").with_status(403),
        2 => ApiError::network("Network error occurred").with_status(502),
        3 => ApiError::timed_out("Timed out"),
        4 => ApiError::bad_request("Too Many Requests: retry after 30").with_status(429),
        _ => ApiError::network("Internal Server Error").with_status(500),
    }
}

async fn simulate(monitor: &ApiMonitor, args: &Args) {
    let success_ratio = args.success_ratio;

    for i in 0..args.calls {
        // ThreadRng is not Send, keep it out of the await
        let (method, chat_id, user_id, latency, error) = {
            let mut rng = rand::thread_rng();
            let method = METHODS.choose(&mut rng).copied().unwrap_or("sendMessage");
            let chat_id = rng.gen_range(-1_000_000_000_000i64..-1_000_000_000);
            let user_id = rng.gen_range(100_000i64..999_999_999);
            let latency = Duration::from_millis(rng.gen_range(100..2000));
            let error = (!rng.gen_bool(success_ratio)).then(|| random_error(&mut rng));
            (method, chat_id, user_id, latency, error)
        };

        tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;

        monitor.record_api_call(method, error.is_none(), latency, Some(chat_id), Some(user_id));
        match error {
            Some(error) => {
                monitor.record_error(&error, method, Some(chat_id), Some(user_id), 0);
                println!("error {} in {} (#{})", error.kind, method, i + 1);
            }
            None if i % 10 == 0 => println!("ok {} (#{})", method, i + 1),
            None => {}
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let monitor = Arc::new(ApiMonitor::default());

    println!("Simulating {} Telegram API calls", args.calls);
    simulate(&monitor, &args).await;

    let stats = monitor.get_error_stats(1.0);
    println!();
    println!("Total calls:    {}", stats.total_calls);
    println!("Total errors:   {}", stats.total_errors);
    println!("Success rate:   {}%", stats.success_rate);
    println!("Error rate:     {}%", stats.error_rate);
    println!("4xx errors:     {}", stats.categories.http_4xx);
    println!("5xx errors:     {}", stats.categories.http_5xx);
    println!("Network errors: {}", stats.categories.network);
    println!("Timeouts:       {}", stats.categories.timeout);
    println!("Rate limited:   {}", stats.categories.rate_limit);
    println!("Health:         {}", monitor.get_health_status().status);

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;
    for (file, format) in [
        ("demo_metrics.json", ExportFormat::Json),
        ("demo_metrics.prom", ExportFormat::Prometheus),
        ("demo_metrics_zabbix.json", ExportFormat::Zabbix),
    ] {
        let path = args.output_dir.join(file);
        monitor
            .export_to_file(&path, format)
            .with_context(|| format!("exporting {} to {}", format, path.display()))?;
        println!("Exported {} to {}", format, path.display());
    }

    println!();
    println!("{}", monitor.export_prometheus());
    println!("{}", serde_json::to_string_pretty(&monitor.export_flat_keys())?);

    if args.serve {
        let config = server::load_config(args.config.as_ref()).await?;
        info!("Serving demo traffic on {}", config.server().address());
        println!("Dashboard: http://{}/", config.server().address());
        ServerBuilder::new()
            .with_config(config)
            .with_monitor(monitor)
            .build()?
            .start()
            .await?;
    }

    Ok(())
}
