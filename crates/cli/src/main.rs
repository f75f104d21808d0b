use clap::Parser;
use stardata_config::StoreConfigLoader;
use stardata_core::CompressionLevel;
use stardata_storage::JsonStore;
use std::path::PathBuf;
use std::sync::Arc;

mod commands;
mod execute;
mod logging;

use commands::Commands;

#[derive(Parser)]
#[command(name = "stardata")]
#[command(about = "Store JSON documents as LZMA-compressed files", long_about = None)]
#[command(version)]
struct Cli {
    /// Compression level for writes (1 fastest - 9 strongest)
    #[arg(short, long, global = true)]
    level: Option<CompressionLevel>,

    /// Write through a temp file and rename it into place
    #[arg(long, global = true, overrides_with = "no_atomic")]
    atomic: bool,

    /// Truncate and write files in place, even if config enables atomic writes
    #[arg(long, global = true, overrides_with = "atomic")]
    no_atomic: bool,

    /// Read settings from this config file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// `Some` only when one of `--atomic` / `--no-atomic` was given; the last
    /// one wins.
    fn atomic_writes(&self) -> Option<bool> {
        if self.atomic {
            Some(true)
        } else if self.no_atomic {
            Some(false)
        } else {
            None
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Parse command-line arguments
    let cli = Cli::parse();

    logging::init()?;

    let config = StoreConfigLoader::load_with(cli.config.as_deref())?;
    let config = StoreConfigLoader::apply_cli_args(config, cli.level, cli.atomic_writes());
    tracing::debug!("Effective configuration: {:?}", config);

    let store = Arc::new(JsonStore::from_config(&config.store));
    cli.command.execute(store, &config).await
}
