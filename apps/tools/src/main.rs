use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dashboard::Dashboard;
use dataset::Dataset;
use shared::{
    domain::ViewId,
    error::{ApiError, ApiException},
    protocol::ControlOverrides,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "./data/billionaires.csv")]
    data_path: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summary statistics of finalWorth.
    Describe,
    /// Control declarations as JSON.
    Controls,
    /// Render one view with default controls plus optional overrides.
    Render {
        view: ViewId,
        /// JSON object of control id to value, e.g. '{"country_show_all":{"kind":"checkbox","value":true}}'
        #[arg(long)]
        overrides: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let dataset = Dataset::load(&cli.data_path)?;

    match cli.command {
        Command::Describe => match dataset.describe() {
            Some(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
            None => println!("dataset is empty"),
        },
        Command::Controls => {
            let dashboard = Dashboard::new(Arc::new(dataset));
            println!("{}", serde_json::to_string_pretty(dashboard.controls())?);
        }
        Command::Render { view, overrides } => {
            let dashboard = Dashboard::new(Arc::new(dataset));
            let overrides: ControlOverrides = match overrides {
                Some(json) => serde_json::from_str(&json).context("invalid overrides")?,
                None => ControlOverrides::new(),
            };
            let state = dashboard
                .state_with(&overrides)
                .map_err(|e| ApiException::from(ApiError::from(e)))?;
            let chart = dashboard
                .render(view, &state)
                .map_err(|e| ApiException::from(ApiError::from(e)))?;
            println!("{}", serde_json::to_string_pretty(&chart)?);
        }
    }

    Ok(())
}

/// `RUST_LOG` directives when present and valid, `info` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
