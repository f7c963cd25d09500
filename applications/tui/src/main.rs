//! Cadence - terminal music player for the song catalog CMS
mod app;
mod config;
mod ui;

use anyhow::Context;
use cadence_audio_desktop::DesktopPlayer;
use cadence_cms_client::CmsClient;
use cadence_core::{Song, SongList};
use cadence_playback::{MusicRepository, MusicViewModel};
use clap::{Parser, Subcommand};
use crate::config::AppConfig;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "cadence=info,cadence_playback=info,cadence_cms_client=info,cadence_audio_desktop=info";

#[derive(Parser)]
#[command(name = "cadence")]
#[command(version, about = "Cadence terminal music player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// CMS base URL (overrides the configuration)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive player (default)
    Play,
    /// Print the song catalog and exit
    List {
        /// Only show top tracks
        #[arg(long)]
        top: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.cms.base_url = base_url;
    }
    config.validate()?;

    init_tracing(&config.log.file)?;

    let client = CmsClient::new(config.cms_config()).context("Invalid CMS configuration")?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::List { top } => list(&client, top).await,
        Commands::Play => play(config, client).await,
    }
}

/// Log to a file; the terminal belongs to the UI
fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

async fn list(client: &CmsClient, top: bool) -> anyhow::Result<()> {
    let songs = client.songs().await.context("Failed to fetch songs")?;
    let tab = if top { SongList::TopTracks } else { SongList::ForYou };

    println!("{}", tab.title());
    for song in tab.filter(&songs) {
        println!("{}", song_row(client, &song));
    }
    Ok(())
}

/// One `list` line: id, title, artist and the cover link when there is one
fn song_row(client: &CmsClient, song: &Song) -> String {
    let mut row = format!("{:>4}  {} - {}", song.id, song.name, song.artist);
    if !song.cover.is_empty() {
        row.push_str(&format!("  [{}]", client.asset_url(&song.cover)));
    }
    row
}

async fn play(config: AppConfig, client: CmsClient) -> anyhow::Result<()> {
    let player = DesktopPlayer::new().context("Failed to open audio output")?;
    player.set_volume(config.playback.volume)?;

    let client_base = client.url().to_string();
    let repository = Arc::new(MusicRepository::new(Arc::new(client), Arc::new(player)));
    let view_model = MusicViewModel::with_progress_interval(repository, config.progress_interval());
    view_model.start();
    info!(base_url = %config.cms.base_url, "Player started");

    let app = app::App::new(view_model, &config.ui).with_asset_base(client_base);

    let mut terminal = ratatui::init();
    let result: anyhow::Result<()> = async {
        execute!(std::io::stdout(), EnableMouseCapture)?;
        app.run(&mut terminal).await
    }
    .await;

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}
