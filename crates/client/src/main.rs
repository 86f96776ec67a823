//! Leaderboard client binary.
//!
//! Main entry point for the lap-time leaderboard.
//!
//! # Architecture
//!
//! This binary is the composition root that assembles:
//! 1. Storage (file or in-memory) via StorageConfig
//! 2. Runtime (live boards, submissions) via RuntimeBuilder
//! 3. Frontend (line-oriented terminal UI)
//!
//! Configuration comes from the environment (and `.env`); command-line flags
//! override it.
//!
//! # Examples
//!
//! ```bash
//! # Persist entries under the platform data directory
//! cargo run -p leaderboard-client
//!
//! # Throwaway session with numeric lap-time ordering
//! cargo run -p leaderboard-client -- --storage memory --lap-order numeric
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use client_frontend_cli::{CliConfig, CliFrontend, FrontendConfig, logging};
use leaderboard_client::Client;
use leaderboard_core::{InputMode, LapTimeComparison};
use leaderboard_runtime::{Runtime, RuntimeConfig, StorageBackend, StorageConfig};

#[derive(Parser, Debug)]
#[command(name = "leaderboard", version, about = "Lap-time leaderboard for staff and clients")]
struct Args {
    /// Where entries are kept [env: LEADERBOARD_STORAGE]
    #[arg(long, value_name = "file|memory")]
    storage: Option<StorageBackend>,

    /// Directory for collection files [env: LEADERBOARD_DATA_DIR]
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Lap-time comparison used for ranking [env: LEADERBOARD_LAP_ORDER]
    #[arg(long, value_name = "lexicographic|numeric")]
    lap_order: Option<LapTimeComparison>,

    /// Lap-time input mode of a new form [env: LEADERBOARD_INPUT_MODE]
    #[arg(long, value_name = "split|text")]
    input_mode: Option<InputMode>,

    /// Rows shown per board [env: LEADERBOARD_BOARD_LIMIT]
    #[arg(long)]
    limit: Option<usize>,

    /// Directory for client.log (default: platform cache dir)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // 1. Load configuration from environment, then apply flags
    let mut runtime_config = RuntimeConfig::from_env();
    let mut storage_config = StorageConfig::from_env();
    let mut frontend_config = FrontendConfig::from_env();
    let mut cli_config = CliConfig::from_env();

    if let Some(order) = args.lap_order {
        runtime_config.lap_order = order;
    }
    if let Some(backend) = args.storage {
        storage_config.backend = backend;
    }
    if let Some(dir) = args.data_dir {
        storage_config.data_dir = Some(dir);
    }
    if let Some(mode) = args.input_mode {
        frontend_config.input_mode = mode;
    }
    if let Some(limit) = args.limit {
        cli_config.board_limit = limit.max(1);
    }

    // 2. Setup logging
    logging::setup_logging(args.log_dir)?;

    tracing::info!("Starting leaderboard client");
    tracing::info!("Storage: {}", storage_config.backend);
    tracing::info!("Lap order: {}", runtime_config.lap_order);

    // 3. Build Runtime
    let repository = storage_config.open()?;
    let runtime = Runtime::builder()
        .config(runtime_config)
        .shared_repository(repository)
        .build()
        .await?;

    tracing::info!("Runtime built successfully");

    // 4. Build Frontend and run
    let frontend = CliFrontend::new(frontend_config, cli_config);
    let client = Client::builder().runtime(runtime).frontend(frontend).build()?;

    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
