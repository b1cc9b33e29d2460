mod catalog;
mod error;
mod harness;
mod repl;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use semtok_core::{Config, Lexicon, Tokenizer};

#[derive(Parser)]
#[command(name = "semtok", about = "Domain-specific natural-language tokenizer")]
struct Cli {
    /// YAML catalog of domains and aliases to load.
    #[arg(long)]
    catalog: PathBuf,

    /// Extra query fingerprints the approximate matcher considers beyond
    /// an alias's own length.
    #[arg(long, default_value_t = 2)]
    approx_slack: usize,

    /// Optional TOML config overriding score-floor and related tunables.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive matching REPL.
    Repl,
    /// Run a relevance suite against the catalog and report pass/fail.
    Check {
        #[arg(long)]
        suite: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_toml(path).map_err(|e| anyhow::anyhow!("{e}"))?,
        None => Config::default(),
    };

    let mut lexicon = Lexicon::new();
    catalog::load_into(&cli.catalog, &mut lexicon, cli.approx_slack)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;

    let mut tokenizer = Tokenizer::new(config);
    lexicon.ingest(&mut tokenizer);
    tracing::info!(domains = lexicon.domains().len(), "catalog ingested");

    match cli.command {
        Command::Repl => repl::run(&lexicon, &tokenizer)?,
        Command::Check { suite } => {
            let cases = harness::load(&suite)?;
            let report = harness::run_suite(&cases, &lexicon, &tokenizer);
            for result in &report.results {
                if !result.passed {
                    tracing::warn!(input = %result.case.input, expected = %result.case.expected, "relevance case failed");
                }
            }
            println!("{}/{} relevance cases passed", report.passed(), report.total());
            for (suite, tally) in &report.by_suite {
                println!("  suite {suite}: {}/{}", tally.passed, tally.total);
            }
            for (priority, tally) in &report.by_priority {
                println!("  priority {priority}: {}/{}", tally.passed, tally.total);
            }
            if report.passed() != report.total() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
