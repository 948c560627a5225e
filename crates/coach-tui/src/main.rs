// Coaching assistant entry point.
//
// 1. Initialize tracing (log to file, the terminal belongs to the TUI)
// 2. Load config and the training repository
// 3. Run the wizard until the user quits

use anyhow::Context;
use tracing::info;

use coach_collect::PremierLeagueScraper;
use coach_core::config;
use coach_core::training::TrainingRepository;
use coach_tui::app::App;
use coach_tui::data::CoachData;
use coach_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("coach starting up");

    let config = config::load_config().context("failed to load configuration")?;
    let season = config.season();
    info!("season {season}, stats under {}", config.data.dir.display());

    let training = TrainingRepository::load(&config.data.training_file).with_context(|| {
        format!(
            "failed to open training file {}",
            config.data.training_file.display()
        )
    })?;
    info!("{} training entries loaded", training.len());

    let scraper =
        PremierLeagueScraper::new(&config.collector).context("failed to build HTTP client")?;
    let app = App::new(CoachData::new(config.data.dir.clone(), season, training));

    tui::run(app, &scraper, config.collector.players_per_position).await
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("coach.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("coach_tui=info,coach_core=info,coach_collect=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
