//! Meteo data API entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use meteodaten_api::api::{create_router, AppState};
use meteodaten_api::config::{Config, SourceKind};
use meteodaten_api::metrics;
use meteodaten_api::source;
use meteodaten_api::utils::shutdown_signal;
use meteodaten_api::ServiceError;

/// Read-through JSON API for daily meteo measurements.
#[derive(Parser, Debug)]
#[command(name = "meteodaten-api")]
#[command(about = "Serve meteo JSON from a local file or a fixed upstream URL")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true, env = "VERBOSE")]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Data source override: file or remote.
    #[arg(long)]
    source: Option<SourceKind>,

    /// HTTP server port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Data source override: file or remote.
        #[arg(long)]
        source: Option<SourceKind>,

        /// HTTP server port.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Fetch from the configured source once and print the result.
    Fetch {
        /// Data source override: file or remote.
        #[arg(long)]
        source: Option<SourceKind>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("meteodaten_api=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(args.log_json.then(|| fmt::layer().json()))
        .with((!args.log_json).then(|| fmt::layer()))
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::Fetch { source }) => cmd_fetch(source).await,
        Some(Command::Serve { source, port }) => cmd_serve(source, port).await,
        None => cmd_serve(args.source, args.port).await,
    }
}

/// Load and validate configuration, applying CLI overrides.
fn load_config(
    source_override: Option<SourceKind>,
    port_override: Option<u16>,
) -> Result<Config, ServiceError> {
    let mut config = Config::load()?;

    if let Some(kind) = source_override {
        config.data_source = kind;
    }
    if let Some(port) = port_override {
        config.port = port;
    }

    config.validate().map_err(ServiceError::InvalidConfig)?;

    Ok(config)
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("METEODATEN API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Data Source: {}", config.data_source);
    match config.data_source {
        SourceKind::File => {
            println!("  File Path: {}", config.data_file_path.display());
            if !config.data_file_path.exists() {
                println!("  WARNING: file does not exist yet, requests will report it missing");
            }
        }
        SourceKind::Remote => println!("  Upstream URL: {}", config.upstream_url),
    }
    if let Ok(addr) = config.bind_addr() {
        println!("  Listen: {}", addr);
    }
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("  Log Level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Fetch once from the configured source.
async fn cmd_fetch(source_override: Option<SourceKind>) -> anyhow::Result<()> {
    let config = load_config(source_override, None)?;
    let source = source::from_config(&config)?;

    info!("Fetching from {} source...", source.kind());

    match source.fetch().await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            error!("Fetch failed: {}", e);
            Err(ServiceError::from(e).into())
        }
    }
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(
    source_override: Option<SourceKind>,
    port_override: Option<u16>,
) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let config = load_config(source_override, port_override).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    let source = source::from_config(&config)?;
    info!("Data source: {}", source.kind());
    match config.data_source {
        SourceKind::File => info!("Serving file: {}", config.data_file_path.display()),
        SourceKind::Remote => info!("Relaying upstream: {}", config.upstream_url),
    }

    let mut app_state = AppState::new(source);
    if config.metrics_enabled {
        match metrics::install_prometheus() {
            Ok(handle) => app_state = app_state.with_metrics(handle),
            Err(e) => warn!("Metrics disabled, recorder install failed: {}", e),
        }
    }

    let addr = config.bind_addr().map_err(ServiceError::InvalidConfig)?;
    let listener = TcpListener::bind(addr).await.map_err(ServiceError::from)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");

    Ok(())
}
