//! inception-status entry point.
//!
//! Parses the command line, initializes tracing, takes the environment
//! snapshot, builds the router and serves until SIGINT/SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inception_status::cache::RedisProbe;
use inception_status::config::{
    BodyLayout, EnvSnapshot, LogFormat, ServiceSettings, DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT,
    DEFAULT_LOG_FILTER, DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_PROBE_TIMEOUT_MS, BANNER,
};
use inception_status::http::start_server;
use inception_status::{create_router, AppError, AppState};

/// inception-status: reports database configuration and cache reachability
#[derive(Parser, Debug)]
#[command(name = "inception-status", version, about)]
struct Args {
    /// Address to bind
    #[arg(long, env = "STATUS_HOST", default_value = DEFAULT_HTTP_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "STATUS_PORT", default_value_t = DEFAULT_HTTP_PORT)]
    port: u16,

    /// Upper bound for one cache probe, in milliseconds
    #[arg(long, env = "PROBE_TIMEOUT_MS", default_value_t = DEFAULT_PROBE_TIMEOUT_MS)]
    probe_timeout_ms: u64,

    /// Maximum number of requests handled at the same time
    #[arg(long, env = "MAX_CONCURRENT_REQUESTS", default_value_t = DEFAULT_MAX_CONCURRENT_REQUESTS)]
    max_concurrent_requests: usize,

    /// Status body layout
    #[arg(long, value_enum, default_value_t = BodyLayout::Full)]
    layout: BodyLayout,

    /// Log level filter (e.g., "inception_status=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Args {
    fn settings(&self) -> ServiceSettings {
        ServiceSettings {
            host: self.host.clone(),
            port: self.port,
            probe_timeout: Duration::from_millis(self.probe_timeout_ms),
            max_concurrent_requests: self.max_concurrent_requests,
            layout: self.layout,
        }
    }
}

fn init_tracing(log_level: Option<String>, format: LogFormat) -> Result<(), AppError> {
    // Priority: CLI > env > default
    let log_filter = log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry = tracing_subscriber::registry().with(EnvFilter::new(&log_filter));
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    init_tracing(args.log_level.clone(), args.log_format)?;

    let snapshot = EnvSnapshot::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid environment configuration, refusing to start");
    })?;

    let settings = args.settings();
    tracing::info!(
        banner = BANNER,
        db_host = %snapshot.db_host,
        redis_host = %snapshot.redis_host,
        redis_port = snapshot.redis_port,
        probe_timeout_ms = settings.probe_timeout.as_millis() as u64,
        max_concurrent_requests = settings.max_concurrent_requests,
        layout = ?settings.layout,
        "Loaded configuration"
    );

    let probe = Arc::new(RedisProbe::new(settings.probe_timeout));
    let state = AppState::new(settings.clone(), snapshot, probe);
    let app = create_router(state);

    start_server(app, &settings).await?;

    Ok(())
}
