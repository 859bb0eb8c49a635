mod export;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::run::{run_parse, run_scrape, RunPaths};

#[derive(Debug, Parser)]
#[command(name = "revscrape")]
#[command(about = "Extract business details and reviews from listing pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every URL in the input list and write the records as JSON
    Run {
        /// Settings file (defaults to `REVSCRAPE_SETTINGS_PATH`)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Input URL list (defaults to `REVSCRAPE_INPUT_PATH`)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output file (defaults to `REVSCRAPE_OUTPUT_PATH`, then the settings file)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run extraction over a saved HTML page and print the records
    Parse {
        /// Saved HTML page
        html_file: PathBuf,
        /// URL the page was saved from
        #[arg(long)]
        url: String,
        /// Settings file (defaults to `REVSCRAPE_SETTINGS_PATH`)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = revscrape_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            settings,
            input,
            output,
        } => {
            run_scrape(
                &config,
                RunPaths {
                    settings,
                    input,
                    output,
                },
            )
            .await
        }
        Commands::Parse {
            html_file,
            url,
            settings,
        } => run_parse(&config, &html_file, &url, settings),
    }
}

#[cfg(test)]
mod tests;
