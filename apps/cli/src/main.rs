mod env;
mod runtime;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use hypr_pipeline::{Pipeline, PipelineConfig, PipelineReport};
use tracing_subscriber::prelude::*;

use crate::env::Env;
use crate::runtime::Runtime;

#[derive(Parser)]
#[command(name = "clips", about = "Pick highlight clips out of a podcast transcript")]
struct Cli {
    /// CSV with `sentence` and `length` columns, one row per sentence.
    transcript: PathBuf,

    /// Cache key for embeddings. Defaults to the transcript file stem.
    #[arg(long)]
    id: Option<String>,

    /// JSON file overriding pipeline defaults.
    #[arg(long, env = "HIGHLIGHT_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "HIGHLIGHT_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Keep embeddings in memory only.
    #[arg(long)]
    no_cache: bool,

    /// Merge continuation rows before embedding.
    #[arg(long)]
    stitch: bool,

    /// Number of clips to ask for.
    #[arg(long)]
    desired: Option<usize>,

    /// Where to write the JSON report. Defaults to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("environment: {0}")]
    Env(#[from] envy::Error),
    #[error(transparent)]
    Storage(#[from] hypr_storage::Error),
    #[error(transparent)]
    Transcript(#[from] hypr_transcript::Error),
    #[error(transparent)]
    Pipeline(#[from] hypr_pipeline::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "clips_failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default(),
    };
    if cli.stitch {
        config.stitch_continuations = true;
    }
    if let Some(desired) = cli.desired {
        config.desired_count = desired;
    }

    let transcript_id = cli.id.clone().unwrap_or_else(|| transcript_id(&cli.transcript));
    let rows = hypr_transcript::read_rows_from_path(&cli.transcript)?;
    tracing::info!(transcript_id = %transcript_id, rows = rows.len(), "transcript_loaded");

    let runtime = Runtime::new(Env::load()?, cli.cache_dir.clone(), cli.no_cache)?;
    let pipeline = Pipeline::new(config, runtime.services());
    let report = pipeline.run(&transcript_id, rows)?;

    write_report(&report, cli.output.as_deref())
}

fn transcript_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript".to_string())
}

fn write_report(report: &PipelineReport, output: Option<&Path>) -> Result<(), Error> {
    let json = serde_json::to_vec_pretty(report)?;
    match output {
        Some(path) => {
            hypr_storage::fs::atomic_write(path, &json)?;
            tracing::info!(path = %path.display(), clips = report.clips.len(), "report_written");
        }
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&json)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
