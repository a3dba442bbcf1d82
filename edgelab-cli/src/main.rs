//! EdgeLab CLI — strategy exploration over exchange candle data.
//!
//! Commands:
//! - `explore` — run exploration iterations and persist what they find

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use edgelab_core::data::HyperliquidProvider;
use edgelab_runner::{Explorer, ExplorerConfig, JsonFileStore, SleepPacer, StdoutProgress};

#[derive(Parser)]
#[command(name = "edgelab", about = "EdgeLab CLI — trading-strategy explorer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run exploration iterations against the exchange API.
    Explore {
        /// Number of candidates to evaluate this session.
        #[arg(default_value_t = 5)]
        iterations: usize,

        /// Path to a TOML config file. Defaults apply without one.
        #[arg(long)]
        config: Option<PathBuf>,

        /// State directory, overriding the configured one.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Coin symbol, overriding the configured one.
        #[arg(long)]
        symbol: Option<String>,

        /// RNG seed for a reproducible session.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Explore {
            iterations,
            config,
            data_dir,
            symbol,
            seed,
        } => {
            let mut config = match config {
                Some(path) => ExplorerConfig::load(&path)?,
                None => ExplorerConfig::default(),
            };
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }
            if let Some(symbol) = symbol {
                config.symbol = symbol;
            }
            if let Some(seed) = seed {
                config.seed = Some(seed);
            }

            let provider = HyperliquidProvider::new(config.api_url.clone());
            let store = JsonFileStore::new(&config.data_dir);
            let explorer = Explorer::new(&config, &provider, &store, &SleepPacer, &StdoutProgress);

            println!(
                "exploring {} for {iterations} iterations (state in {})",
                config.symbol,
                config.data_dir.display(),
            );
            explorer.run(iterations)?;
            Ok(())
        }
    }
}
