// Interactive entry of training drills into data/training/<file>.csv.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use coach_collect::training_cli::run_session;

#[derive(Debug, Parser)]
#[command(name = "add-training", about = "Register training drills interactively")]
struct Args {
    /// Directory that `data/training/` is resolved against.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let args = Args::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let (path, count) = run_session(stdin.lock(), stdout.lock(), &args.root)
        .context("training entry session failed")?;
    tracing::info!("{count} entries in {}", path.display());
    Ok(())
}

/// Warnings only by default so logs do not interleave with the prompts.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
