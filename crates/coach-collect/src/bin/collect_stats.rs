// Collects raw player stats from the stats site into per-position CSVs.
//
// Flags override the `[data]` and `[collector]` sections of config/coach.toml.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use coach_collect::{collect_season_filtered, Filters, PremierLeagueScraper};
use coach_core::config;
use coach_core::position::Position;
use coach_core::season::Season;

#[derive(Debug, Parser)]
#[command(name = "collect-stats", about = "Scrape top-player stats into data/<season>/")]
struct Args {
    /// Season to collect, e.g. 2022/23. Defaults to the configured season.
    #[arg(short, long)]
    season: Option<Season>,

    /// Only players from this club.
    #[arg(short, long)]
    club: Option<String>,

    /// Only players of this nationality.
    #[arg(short = 'n', long)]
    nationality: Option<String>,

    /// Collect a single position instead of all four.
    #[arg(short, long)]
    position: Option<Position>,

    /// Players to collect per position.
    #[arg(short = 'N', long)]
    number: Option<usize>,

    /// Root directory for the per-season CSVs.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let args = Args::parse();

    let config = config::load_config().context("failed to load configuration")?;
    let season = args.season.unwrap_or_else(|| config.season());
    let data_dir = args.data_dir.unwrap_or_else(|| config.data.dir.clone());
    let limit = args.number.unwrap_or(config.collector.players_per_position);
    let positions: Vec<Position> = args.position.into_iter().collect();
    let filters = Filters {
        club: args.club,
        nationality: args.nationality,
    };

    let scraper =
        PremierLeagueScraper::new(&config.collector).context("failed to build HTTP client")?;
    info!(
        "collecting {limit} players per position for {season} into {}",
        data_dir.display()
    );

    let written = collect_season_filtered(&scraper, &data_dir, season, &positions, limit, &filters)
        .await
        .with_context(|| format!("collection for {season} failed"))?;

    for path in &written {
        println!("{}", path.display());
    }
    info!("collection complete, {} files written", written.len());
    Ok(())
}

/// Log to stderr; stdout carries the written file paths.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coach_collect=info,coach_core=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
