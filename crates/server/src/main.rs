use anyhow::{Context, Result};
use arrgauge_collector::CollectorRegistry;
use arrgauge_core::{ApiKey, ApiVersion, AppFamily};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod exposition;

use config::{AppConfig, ExporterConfig};

#[derive(Parser, Debug)]
#[command(name = "arrgauge")]
#[command(about = "Prometheus exporter for Sonarr, Radarr, Lidarr, Readarr, Prowlarr and friends", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "ARRGAUGE_CONFIG", default_value = "arrgauge.toml")]
    config: PathBuf,

    /// Host to bind to [default: 0.0.0.0]
    #[arg(long, env = "ARRGAUGE_HOST")]
    host: Option<String>,

    /// Port to listen on [default: 9707]
    #[arg(short, long, env = "ARRGAUGE_PORT")]
    port: Option<u16>,

    /// Log output format
    #[arg(long, env = "ARRGAUGE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Application family of a single app given on the command line
    #[arg(long, env = "ARR_FAMILY", requires = "url")]
    family: Option<AppFamily>,

    /// Base URL of the single app
    #[arg(long, env = "ARR_URL", requires = "family")]
    url: Option<String>,

    /// API key of the single app
    #[arg(long, env = "ARR_API_KEY", hide_env_values = true, conflicts_with = "api_key_file")]
    api_key: Option<String>,

    /// File holding the API key of the single app
    #[arg(long, env = "ARR_API_KEY_FILE")]
    api_key_file: Option<PathBuf>,

    /// API version of the single app (defaults per family)
    #[arg(long, env = "ARR_API_VERSION")]
    api_version: Option<ApiVersion>,

    /// Skip TLS certificate verification for the single app
    #[arg(long, env = "ARR_DISABLE_TLS_VERIFY")]
    disable_tls_verify: bool,

    /// Collect per-episode metrics (Sonarr and Whisparr)
    #[arg(long, env = "ARR_EXTRA_METRICS")]
    extra_metrics: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl Args {
    /// The app described by the single-app flags, if any.
    fn cli_app(&self) -> Option<AppConfig> {
        let family = self.family?;
        let mut app = AppConfig::new(family, self.url.clone().unwrap_or_default());
        app.api_key = self.api_key.clone().map(ApiKey::new);
        app.api_key_file = self.api_key_file.clone();
        app.api_version = self.api_version;
        app.tls_verify = !self.disable_tls_verify;
        app.extra_metrics = self.extra_metrics;
        Some(app)
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "arrgauge=info,tower_http=info".into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting arrgauge");

    let mut config = ExporterConfig::load(&args.config)?;
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(app) = args.cli_app() {
        config.apps.push(app);
    }

    let apps = config.resolve_apps().context("Invalid configuration")?;

    let mut registry = CollectorRegistry::new();
    for app in apps {
        let family = app.family;
        if registry.register_app(app) == 0 {
            tracing::warn!(app = %family, "no collectors available for this application");
        }
    }

    let addr = config.listen_addr();
    tracing::info!("Starting metrics server on {}", addr);

    api::serve(&addr, registry).await?;

    Ok(())
}
