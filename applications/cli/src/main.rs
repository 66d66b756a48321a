/// Podcastr CLI - headless host for the podcast player
use anyhow::Context;
use clap::{Parser, Subcommand};
use podcastr_cli::{load_episodes, run_session, CliConfig};
use podcastr_player::format_duration;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "podcastr-cli")]
#[command(about = "Podcastr player driven from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an episode list on a simulated media handle
    Play {
        /// JSON file holding an array of episodes
        episodes: PathBuf,

        /// Index of the episode to start with
        #[arg(short, long, default_value_t = 0)]
        index: usize,

        /// Start with shuffle enabled
        #[arg(long)]
        shuffle: bool,

        /// Start with loop enabled
        #[arg(long = "loop")]
        looping: bool,

        /// Fixed shuffle seed
        #[arg(long, env = "PODCASTR_SEED")]
        seed: Option<u64>,

        /// Configuration file path (default: ./podcastr.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print every store event as a JSON line when done
        #[arg(long)]
        events: bool,
    },
    /// Print a number of seconds as an MM:SS label
    Format {
        /// Seconds to format
        seconds: u64,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "podcastr_cli=info,podcastr_player=info,podcastr_playback=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            episodes,
            index,
            shuffle,
            looping,
            seed,
            config,
            events,
        } => {
            let mut config = CliConfig::load_from(config.as_deref())
                .context("Failed to load configuration")?;
            config.playback.start_shuffling |= shuffle;
            config.playback.start_looping |= looping;
            if seed.is_some() {
                config.playback.shuffle_seed = seed;
            }

            play(&episodes, index, &config, events)?;
        }
        Commands::Format { seconds } => {
            println!("{}", format_duration(seconds));
        }
    }

    Ok(())
}

fn play(path: &Path, index: usize, config: &CliConfig, dump_events: bool) -> anyhow::Result<()> {
    let episodes = load_episodes(path)
        .with_context(|| format!("Failed to read episodes from {}", path.display()))?;

    tracing::info!("Starting Podcastr session");
    tracing::info!("Episodes: {}", episodes.len());
    tracing::info!("Start index: {}", index);

    let report = run_session(episodes, index, config);

    tracing::info!(
        "Session ended after {} ticks ({} episodes started)",
        report.ticks,
        report.episodes_started()
    );
    tracing::info!("{}", report.final_view);

    if dump_events {
        for event in &report.events {
            println!("{}", serde_json::to_string(event)?);
        }
    }

    Ok(())
}
