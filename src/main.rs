//! User service entry point.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info, info_span, Instrument};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use user_api::api::{create_router, AppState};
use user_api::config::Config;
use user_api::domain::UnconfiguredUserLookup;
use user_api::server::Server;
use user_api::utils::shutdown_signal;
use user_api::{Result as ServiceResult, ServiceError};

const SERVICE_NAME: &str = "user-api";

/// User lookup HTTP service.
#[derive(Parser, Debug)]
#[command(name = "user-api")]
#[command(about = "Serves user lookups plus liveness/readiness probes")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "LOG_JSON")]
    json_logs: bool,

    /// Env file read before the process environment.
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Run,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    let config = load_config(&args.env_file)?;

    init_tracing(args.verbose, args.json_logs)?;

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Run) | None => Ok(cmd_run(config).await?),
    }
}

/// Load and validate configuration.
fn load_config(env_file: &Path) -> Result<Config, ServiceError> {
    let config = Config::load(env_file)?;
    config.validate().map_err(ServiceError::InvalidConfig)?;
    Ok(config)
}

/// Install the global tracing subscriber.
fn init_tracing(verbose: bool, json: bool) -> Result<(), ServiceError> {
    let filter = if verbose {
        EnvFilter::new("user_api=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .try_init()
        .map_err(|e| ServiceError::Logging(e.to_string()))
}

/// Print a configuration summary.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("{} - CONFIGURATION CHECK", SERVICE_NAME.to_uppercase());
    println!("======================================================================");
    println!("  Build: {} ({}, {})", config.build_tag, config.build_commit, config.build_time);
    println!("  API Host: {}", config.server_api_host);
    println!("  Debug Host: {}", config.server_debug_host);
    println!("  Read Timeout: {:?}", config.server_read_timeout);
    println!("  Write Timeout: {:?}", config.server_write_timeout);
    println!("  Idle Timeout: {:?}", config.server_idle_timeout);
    println!("  Shutdown Timeout: {:?}", config.server_shutdown_timeout);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Serve the API until a shutdown signal arrives.
async fn cmd_run(config: Config) -> ServiceResult<()> {
    info!(service = SERVICE_NAME, config = ?config, "startup");

    let parallelism = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let span = info_span!(
        "service",
        build_commit = %config.build_commit,
        build_tag = %config.build_tag,
        build_time = %config.build_time,
        available_parallelism = parallelism,
    );

    async move {
        info!("initializing V1 API support");

        let state = AppState::new(Arc::new(UnconfiguredUserLookup), config.server_write_timeout);
        let router = create_router(state);

        let server = Server::bind(
            &config.server_api_host,
            router,
            config.server_shutdown_timeout,
        )
        .await?;

        info!(
            host = %server.local_addr()?,
            read_timeout = ?config.server_read_timeout,
            write_timeout = ?config.server_write_timeout,
            idle_timeout = ?config.server_idle_timeout,
            "starting api server"
        );

        server.run(shutdown_signal()).await.map_err(|e| {
            error!(error = %e, "server stopped with error");
            e
        })?;

        Ok::<(), ServiceError>(())
    }
    .instrument(span)
    .await
}
