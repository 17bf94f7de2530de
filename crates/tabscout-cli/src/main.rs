// SPDX-License-Identifier: GPL-3.0-or-later
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tabscout_application::{classify_features, AppState};
use tabscout_config::load as load_config;
use tabscout_domain::{AudioFeatures, Track};
use tracing::{info, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

const DEFAULT_LOG_LEVEL: &str = "info";

type LogFilterHandle = reload::Handle<EnvFilter, Registry>;

#[derive(Debug, Parser)]
#[command(name = "tabscout", version, about = "Find guitar tabs for playlist tracks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// List the tracks that have a tab page, as JSON
    ///
    /// Tracks come either from a Spotify playlist (requires
    /// TABSCOUT_SPOTIFY__ACCESS_TOKEN or spotify.access_token) or from a JSON
    /// file holding an array of track objects.
    Scan {
        /// Spotify playlist ID
        #[arg(long, conflicts_with = "tracks", required_unless_present = "tracks")]
        playlist: Option<String>,
        /// JSON file with an array of tracks
        #[arg(long)]
        tracks: Option<PathBuf>,
    },
    /// Estimate playing difficulty for Spotify tracks from their audio features
    Difficulty {
        /// Spotify track IDs
        #[arg(required = true)]
        track_ids: Vec<String>,
    },
    /// Classify a tempo/energy pair without any network access
    Classify {
        /// Tempo in BPM (defaults to 120)
        #[arg(long)]
        tempo: Option<f64>,
        /// Energy between 0 and 1 (defaults to 0.5)
        #[arg(long)]
        energy: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (subscriber, log_filter) = build_subscriber(std::io::stderr);
    subscriber.init();

    let config = load_config(cli.config.as_deref())?;
    apply_log_level(&log_filter, &config.telemetry.log_level)?;

    let state = AppState::new(config)?;
    state.on_start();

    match cli.command {
        Commands::Scan { playlist, tracks } => {
            let tracks = match (playlist, tracks) {
                (Some(playlist_id), _) => {
                    state
                        .spotify_client()?
                        .fetch_playlist_tracks(&playlist_id)
                        .await?
                }
                (None, Some(path)) => read_tracks(&path)?,
                (None, None) => anyhow::bail!("either --playlist or --tracks is required"),
            };
            info!(target: "cli", tracks = tracks.len(), "scanning tracks for tabs");

            let enriched = state.pipeline.enrich(tracks).await;
            println!("{}", serde_json::to_string_pretty(&enriched)?);
        }
        Commands::Difficulty { track_ids } => {
            let detector = state.difficulty_detector()?;
            let mut labels = BTreeMap::new();
            for track_id in track_ids {
                let label = detector.detect(&track_id).await;
                labels.insert(track_id, label);
            }
            println!("{}", serde_json::to_string_pretty(&labels)?);
        }
        Commands::Classify { tempo, energy } => {
            let label = classify_features(&AudioFeatures {
                id: None,
                tempo,
                energy,
            });
            println!("{}", label);
        }
    }

    Ok(())
}

/// The subscriber starts at the default level so configuration loading is
/// logged. The returned handle swaps in the configured level afterwards.
fn build_subscriber<W>(writer: W) -> (impl Subscriber + Send + Sync + 'static, LogFilterHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(env_filter(DEFAULT_LOG_LEVEL));
    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_names(true)
        .with_level(true);

    (tracing_subscriber::registry().with(filter).with(fmt_layer), handle)
}

fn apply_log_level(handle: &LogFilterHandle, level: &str) -> Result<()> {
    handle
        .reload(env_filter(level))
        .context("applying configured log level")
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn read_tracks(path: &Path) -> Result<Vec<Track>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading tracks from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing tracks from {}", path.display()))
}
