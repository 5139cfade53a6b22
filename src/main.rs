mod bootstrap;
mod commands;

use mediastore_events::EventBus;
use mediastore_storage::ObjectStorageClient;
use crate::bootstrap::{config, logging};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "mediastore",
    version,
    about = "Object storage for media server recordings and artifacts"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// Config file, created with defaults when missing
    #[arg(long, global = true, env = "MEDIASTORE_CONFIG", default_value = "mediastore.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.verbose);

    let events = EventBus::new(false);
    let config = config::load(&cli.config, &events).await?;

    let client = ObjectStorageClient::new(config.storage, Arc::clone(&events));

    commands::run(cli.command, &client).await
}
