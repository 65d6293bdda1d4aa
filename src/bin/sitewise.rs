#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use sitewise::config::{load_config_from_path, DecisionConfig};
use sitewise::evaluation::run_random_index_suite;
use sitewise::problem::{run_problem, weigh_problem, DecisionProblem};
use sitewise::report::render_markdown;

#[derive(Parser)]
#[command(name = "sitewise", version, about = "AHP + TOPSIS + Profile Matching site selection")]
struct Cli {
    /// Threshold/clipping config (.toml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute AHP criteria weights and the consistency ratio
    Weights {
        #[arg(long)]
        input: PathBuf,
        /// Output JSON path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Run weighting plus TOPSIS and/or Profile Matching
    Evaluate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Estimate the random consistency index by simulation
    EvalRi {
        #[arg(long)]
        out: PathBuf,
        /// Largest matrix size to simulate
        #[arg(long, default_value_t = 10)]
        max_n: usize,
        #[arg(long, default_value_t = 1000)]
        samples: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Md,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config_from_path(path)?,
        None => DecisionConfig::default(),
    };

    match cli.command {
        Commands::Weights { input, out } => {
            let problem: DecisionProblem = read_json(&input)?;
            let weighting = weigh_problem(&problem, config)?;
            let json = serde_json::to_string_pretty(&weighting)?;
            emit(out.as_deref(), &json)?;
        }
        Commands::Evaluate { input, out, format } => {
            let problem: DecisionProblem = read_json(&input)?;
            let outcome = run_problem(&problem, config)?;
            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&outcome)?,
                OutputFormat::Md => render_markdown(&outcome),
            };
            emit(out.as_deref(), &rendered)?;
        }
        Commands::EvalRi {
            out,
            max_n,
            samples,
            seed,
        } => {
            if max_n < 1 {
                return Err("--max-n must be >= 1".into());
            }
            let sizes: Vec<usize> = (1..=max_n).collect();
            let results = run_random_index_suite(&sizes, samples, seed)?;
            let mut file = File::create(out)?;
            for result in &results {
                let line = serde_json::to_string(result)?;
                writeln!(file, "{line}")?;
            }
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<T, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn emit(path: Option<&Path>, content: &str) -> Result<(), io::Error> {
    match path {
        Some(path) => std::fs::write(path, content),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{content}")
        }
    }
}
