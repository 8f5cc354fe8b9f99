//! Runs a traversal pass over a graph stored as JSON lines.
//!
//! ```text
//! traverse --config traverse.toml --input graph.jsonl --output derived.jsonl -- -w 4
//! ```
//!
//! Arguments after `--` are handed to timely, and select the number of workers
//! and processes. Rebuilt vertices are gathered at worker 0, whose process alone
//! writes the output.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use differential_traverse::{jsonl, run_pass, Delivery};
use differential_traverse::{AtomicEdgeCounter, Counter, EdgeCounter, Emitter, Error, Result, TraverseConfig, Vertex};

/// Derives edges summarizing two-hop paths.
#[derive(Debug, Parser)]
#[command(name = "traverse")]
struct Args {
    /// TOML file with a `[traverse]` table.
    #[arg(long)]
    config: PathBuf,
    /// Vertices to read, one JSON object per line.
    #[arg(long)]
    input: PathBuf,
    /// Where to write rebuilt vertices; standard output if absent.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Arguments for timely, e.g. `-w 4`.
    #[arg(last = true)]
    timely: Vec<String>,
}

fn main() -> ExitCode {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "traverse pass failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {

    // Configuration errors must surface before any worker reads a vertex.
    let config = Arc::new(TraverseConfig::from_toml_file(&args.config)?);
    tracing::info!(%config, input = %args.input.display(), "starting traverse pass");

    let counter: Arc<dyn EdgeCounter> = Arc::new(AtomicEdgeCounter::new());
    let shared = Arc::clone(&counter);
    let input = args.input;
    let output = args.output;

    let guards = timely::execute_from_args(args.timely.into_iter(), move |worker| -> Result<usize> {
        let reader = BufReader::new(File::open(&input)?);
        let vertices = jsonl::read_vertices(reader, worker.index(), worker.peers())?;
        let emitter = Emitter::new(Arc::clone(&config), Arc::clone(&shared));
        let rebuilt = run_pass(worker, vertices, emitter, Delivery::FirstWorker);
        if worker.index() == 0 {
            write_output(output.as_deref(), &rebuilt)?;
        }
        Ok(rebuilt.len())
    })
    .map_err(Error::Worker)?;

    let mut written = 0;
    for result in guards.join() {
        written += result.map_err(Error::Worker)??;
    }

    // Each process reports the edges its own workers derived.
    tracing::info!(
        counter = %Counter::EdgesCreated,
        value = counter.get(),
        written,
        "traverse pass finished"
    );

    Ok(())
}

fn write_output(path: Option<&Path>, vertices: &[Vertex]) -> Result<()> {
    match path {
        Some(path) => jsonl::write_vertices(BufWriter::new(File::create(path)?), vertices),
        None => jsonl::write_vertices(std::io::stdout().lock(), vertices),
    }
}
