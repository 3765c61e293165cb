//! Harmony - command-line music player
//!
//! Plays a JSON track catalogue through a simulated output, remembering
//! position, volume, mode, favorites, recent plays and playlists between runs.

use anyhow::Context;
use clap::{Parser, Subcommand};
use harmony_cli::{commands, simulate, AppConfig, ConsoleView, Session, DEFAULT_CONFIG_FILE};
use harmony_core::PlaybackMode;
use harmony_playback::bind_view;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str =
    "harmony_cli=info,harmony_playback=info,harmony_storage=info,harmony_core=info";

#[derive(Parser)]
#[command(name = "harmony")]
#[command(about = "Command-line music player", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (default: ./harmony.toml if present)
    #[arg(short, long, env = "HARMONY_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Track catalogue (JSON array), overriding the config
    #[arg(long)]
    catalogue: Option<PathBuf>,

    /// State file, overriding the config
    #[arg(long)]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show what is playing
    Status,

    /// List tracks, optionally filtered
    Tracks {
        /// Case-insensitive search over title, artist, album and tags
        query: Option<String>,

        #[arg(long)]
        tag: Option<String>,
    },

    /// List all tags in the catalogue
    Tags,

    /// Reload the catalogue, bypassing the cache
    Refresh,

    /// Play a track (number or id), or resume the current one
    Play { track: Option<String> },

    Pause,

    /// Toggle between playing and paused
    Toggle,

    Next,

    Prev,

    /// Seek to `40%`, `1:30` or a number of seconds
    Seek { position: String },

    /// Show or set the volume (0-100)
    Volume { percent: Option<f64> },

    /// Toggle mute
    Mute,

    /// Set the playback mode, or cycle to the next one
    Mode {
        /// sequence, repeat_all, repeat_one or shuffle
        mode: Option<PlaybackMode>,
    },

    /// Toggle a favorite (defaults to the current track)
    Favorite { track: Option<String> },

    /// List favorites
    Favorites,

    /// Show recently played tracks
    Recent {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Manage playlists
    Playlist {
        #[command(subcommand)]
        action: PlaylistCommand,
    },

    /// Play in real time until the duration elapses, playback stops or Ctrl-C
    Run {
        /// Simulated seconds to play
        #[arg(short, long, default_value_t = 60.0)]
        seconds: f64,

        /// Do not print transitions
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write a config file with the default settings
    InitConfig {
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum PlaylistCommand {
    List,
    Create { name: String },
    Delete { name: String },
    Rename { name: String, new_name: String },
    Show { name: String },
    Add { name: String, track: String },
    Remove { name: String, track: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Command::InitConfig { path, force } = &cli.command {
        return init_config(path, *force);
    }

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(catalogue) = cli.catalogue {
        config.library.catalogue = catalogue;
    }
    if let Some(state_file) = cli.state_file {
        config.storage.state_file = state_file;
    }

    let mut session = Session::open(config)?;
    let output = run_command(&mut session, cli.command).await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

async fn run_command(session: &mut Session, command: Command) -> anyhow::Result<String> {
    let output = match command {
        Command::Status => commands::status(session),
        Command::Tracks { query, tag } => {
            commands::tracks(session, query.as_deref(), tag.as_deref())
        }
        Command::Tags => commands::tags(session),
        Command::Refresh => commands::refresh(session),
        Command::Play { track } => commands::play(session, track.as_deref())?,
        Command::Pause => commands::pause(session),
        Command::Toggle => commands::toggle(session)?,
        Command::Next => commands::next(session)?,
        Command::Prev => commands::prev(session)?,
        Command::Seek { position } => commands::seek(session, &position)?,
        Command::Volume { percent } => commands::volume(session, percent),
        Command::Mute => commands::mute(session),
        Command::Mode { mode } => commands::mode(session, mode),
        Command::Favorite { track } => commands::favorite(session, track.as_deref())?,
        Command::Favorites => commands::favorites(session),
        Command::Recent { limit } => commands::recent(session, limit),
        Command::Playlist { action } => run_playlist(session, action)?,
        Command::Run { seconds, quiet } => run_simulation(session, seconds, quiet).await?,
        Command::InitConfig { path, force } => {
            init_config(&path, force)?;
            String::new()
        }
    };
    Ok(output)
}

fn run_playlist(session: &Session, action: PlaylistCommand) -> harmony_cli::Result<String> {
    match action {
        PlaylistCommand::List => Ok(commands::playlist_list(session)),
        PlaylistCommand::Create { name } => commands::playlist_create(session, &name),
        PlaylistCommand::Delete { name } => commands::playlist_delete(session, &name),
        PlaylistCommand::Rename { name, new_name } => {
            commands::playlist_rename(session, &name, &new_name)
        }
        PlaylistCommand::Show { name } => commands::playlist_show(session, &name),
        PlaylistCommand::Add { name, track } => commands::playlist_add(session, &name, &track),
        PlaylistCommand::Remove { name, track } => {
            commands::playlist_remove(session, &name, &track)
        }
    }
}

async fn run_simulation(session: &Session, seconds: f64, quiet: bool) -> anyhow::Result<String> {
    let _view = (!quiet).then(|| bind_view(&session.engine().lock(), ConsoleView::stdout()));

    if !session.engine().lock().is_playing() {
        commands::play(session, None)?;
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    let report = simulate(session, seconds, shutdown).await?;

    Ok(format!(
        "Played {:.1}s, {} track(s) finished ({:?})\n{}",
        report.simulated_seconds,
        report.tracks_finished,
        report.reason,
        commands::status(session)
    ))
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let text = AppConfig::default().to_toml()?;
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
