mod output;
mod search;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricecmp")]
#[command(about = "Compare product prices across retail platforms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every platform (or the named ones) for a product
    Search {
        /// Product query, e.g. "Nike Air Jordan"
        query: String,

        /// Restrict the search to a platform by name or slug; repeatable
        #[arg(long = "platform", value_name = "NAME")]
        platforms: Vec<String>,

        /// Seed for synthetic fallback records (overrides PRICECMP_SYNTHETIC_SEED)
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List the supported platforms and their profiles
    Platforms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = pricecmp_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            query,
            platforms,
            seed,
            format,
        } => {
            if seed.is_some() {
                config.synthetic_seed = seed;
            }
            search::run_search(&config, &query, &platforms, format).await?;
        }
        Commands::Platforms => search::run_platforms(),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
