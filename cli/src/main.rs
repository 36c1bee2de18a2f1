//! `usecase-tables` command line entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use uct_cli::logging::init_logging;
use uct_cli::{run_batch, BatchSummary, Config};

#[derive(Parser, Debug)]
#[command(name = "usecase-tables")]
#[command(version, about = "Render use-case scenarios as text, CSV and LaTeX tables")]
struct Cli {
    /// Configuration file (defaults to ./usecase-tables.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the use-case YAML files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// File name of the text report inside the data directory
    #[arg(long)]
    report: Option<String>,

    /// LaTeX document to inject tables into
    #[arg(long)]
    latex: Option<PathBuf>,

    /// Do not write CSV files
    #[arg(long)]
    no_csv: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config =
            Config::discover(self.config.as_deref()).context("failed to load configuration")?;

        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        if let Some(report) = self.report {
            config.text_report = report;
        }
        if let Some(latex) = self.latex {
            config.latex_document = Some(latex);
        }
        if self.no_csv {
            config.csv = false;
        }

        Ok(config)
    }
}

fn run(cli: Cli) -> anyhow::Result<BatchSummary> {
    let config = cli.into_config()?;
    run_batch(&config)
        .with_context(|| format!("batch over {} aborted", config.data_dir.display()))
}

fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()) {
        Ok(summary) => {
            info!(
                "{} use case(s) rendered, {} failed, LaTeX: {} spliced, {} skipped",
                summary.processed.len(),
                summary.failed.len(),
                summary.latex_spliced,
                summary.latex_skipped
            );
            for failed in &summary.failed {
                error!("{}: {}", failed.name, failed.reason);
            }
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
