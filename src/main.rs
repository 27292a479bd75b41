//! Fareflow service entry point.

use clap::Parser;
use fareflow::config::FareflowConfig;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Fareflow - a dynamic ride-pricing recommendation service.
#[derive(Parser)]
#[command(name = "fareflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "FAREFLOW_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FAREFLOW_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Bind address for the pricing API
    #[arg(short, long, env = "FAREFLOW_BIND_ADDR")]
    bind: Option<SocketAddr>,

    /// Path to the model artifact
    #[arg(long, env = "FAREFLOW_MODEL_PATH")]
    model_path: Option<PathBuf>,

    /// Path to the scaler artifact
    #[arg(long, env = "FAREFLOW_SCALER_PATH")]
    scaler_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Build configuration from file (if given) with CLI overrides
    let mut config = match &cli.config {
        Some(path) => FareflowConfig::from_file(path)?,
        None => FareflowConfig::default(),
    };

    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }
    if let Some(path) = cli.model_path {
        config.artifacts.model_path = path;
    }
    if let Some(path) = cli.scaler_path {
        config.artifacts.scaler_path = path;
    }
    config.observability.log_level = cli.log_level;

    config.validate()?;

    fareflow::run(config).await?;
    Ok(())
}
