//! reposcraper CLI
//!
//! Extracts methods from every file of one language under a local checkout
//! and writes them as JSON.

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use anyhow::{bail, Context, Result};
use clap::Parser;
use reposcraper::core::CONFIG_FILE_NAME;
use reposcraper::formats::{save_all, save_records, write_aggregated, write_records};
use reposcraper::{
    scrape_directory, successful_records, summarize, ExtractedRecord, RepositoryInfo,
    ScraperConfig,
};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Extract methods and their comments from a source tree.
#[derive(Parser, Debug)]
#[command(name = "reposcraper")]
#[command(version = reposcraper::VERSION)]
#[command(about = "Extract methods and their comments from a source tree")]
#[command(after_help = "EXAMPLES:
  # All C# methods of a checkout, as a JSON array on stdout
  reposcraper ./BankApp --language csharp

  # Python methods into an aggregated results document
  reposcraper ./service --language python --aggregate -o out/results.json
")]
struct Cli {
    /// Root of the checkout to scan
    #[arg(value_name = "PATH")]
    root: PathBuf,

    /// Language to extract [csharp, python]
    #[arg(short = 'l', long = "language", value_name = "LANG")]
    language: String,

    /// Repository name recorded in the output (default: directory name)
    #[arg(long = "repo", value_name = "NAME")]
    repo: Option<String>,

    /// Repository owner recorded in the output
    #[arg(long = "owner", value_name = "OWNER", default_value = "local")]
    owner: String,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Configuration file (default: <PATH>/.reposcraper_config.json)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Worker threads (default: one per core)
    #[arg(short = 'j', long = "jobs", value_name = "N")]
    jobs: Option<usize>,

    /// Columns a tab expands to for indentation-based languages
    #[arg(long = "tab-width", value_name = "N")]
    tab_width: Option<usize>,

    /// Write the aggregated results document instead of a plain array
    #[arg(long = "aggregate")]
    aggregate: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "reposcraper=debug" } else { "reposcraper=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<ScraperConfig> {
    let mut config = match &cli.config {
        Some(path) => ScraperConfig::load(path)?,
        None => ScraperConfig::discover(&cli.root)
            .with_context(|| format!("loading {}", CONFIG_FILE_NAME))?,
    };
    if let Some(jobs) = cli.jobs {
        config = config.with_workers(jobs);
    }
    if let Some(tab_width) = cli.tab_width {
        config = config.with_tab_width(tab_width);
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.root.is_dir() {
        bail!("Not a directory: {}", cli.root.display());
    }

    let config = load_config(&cli)?;
    let mut repository = RepositoryInfo::local(&cli.root, cli.owner.clone());
    if let Some(name) = &cli.repo {
        repository.name = name.clone();
    }

    info!(root = %cli.root.display(), language = %cli.language, "scanning");
    let outcomes = scrape_directory(&cli.root, &cli.language, Arc::new(repository), &config)?;

    for outcome in outcomes.iter().filter(|o| !o.is_successful()) {
        warn!(
            path = %outcome.source().path,
            error = outcome.error().unwrap_or_default(),
            "file skipped"
        );
    }

    let summary = summarize(&outcomes);
    let records: Vec<ExtractedRecord> = successful_records(&outcomes)
        .into_iter()
        .map(ExtractedRecord::from)
        .collect();

    match &cli.output {
        Some(path) if cli.aggregate => save_all(path, &records)?,
        Some(path) => save_records(path, &records)?,
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            if cli.aggregate {
                write_aggregated(&mut out, &records)?;
            } else {
                write_records(&mut out, &records)?;
            }
            out.flush()?;
        }
    }

    info!(
        files = summary.total_files,
        failed = summary.failed_files,
        methods = summary.total_methods,
        degraded = summary.degraded_methods,
        "done"
    );
    if let Some(path) = &cli.output {
        eprintln!("Wrote {} methods to {}", records.len(), path.display());
    }

    Ok(())
}
