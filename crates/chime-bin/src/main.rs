// chime: command-line front end for the notification sound engine.

mod logging;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chime_audio::renderer::{CueRenderer, write_wav};
use chime_audio::{NotificationService, Registry, SoundCategory, output};
use chime_config::EngineConfig;
use clap::{Parser, Subcommand};
use tokio::runtime::Handle;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "chime", about = "Synthesized notification sounds per message category")]
struct Args {
    /// Path to the engine config JSON file.
    #[arg(long, env = "CHIME_CONFIG", default_value = "chime.json")]
    config: PathBuf,

    /// Start with sound disabled.
    #[arg(long, global = true)]
    mute: bool,

    /// Show debug logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to a daily-rotated file in this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play cues one after another, waiting for each to finish.
    Play {
        #[arg(required = true)]
        categories: Vec<SoundCategory>,
    },
    /// Play every category in settings order.
    Test,
    /// List categories with their cue names and timing.
    List,
    /// Render a cue to a WAV file instead of playing it.
    Render {
        category: SoundCategory,
        /// Output WAV path.
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Load config from file, falling back to defaults if not found.
fn load_config(path: &Path) -> EngineConfig {
    if !path.exists() {
        info!(path = %path.display(), "Config not found, using defaults");
        return EngineConfig::default();
    }
    match EngineConfig::read(path) {
        Ok(config) => {
            info!(path = %path.display(), "Loaded engine config");
            config
        }
        Err(e) => {
            warn!("{e:#}, using defaults");
            EngineConfig::default()
        }
    }
}

fn build_service(config: &EngineConfig) -> NotificationService {
    let probe = output::default_device(config.effective_sample_rate(), config.channels);
    NotificationService::from_config(config, probe, Handle::current())
}

fn list() {
    for category in SoundCategory::SETTINGS_ORDER {
        let profile = Registry::profile(category);
        println!(
            "{:<8} {:<8} {}  ({} x {:.0} Hz, {:.2} s)",
            category.id(),
            category.label(),
            Registry::display_name(category),
            profile.tone_count(),
            profile.frequency,
            profile.cue_length(),
        );
    }
}

fn render(config: &EngineConfig, category: SoundCategory, path: &Path) -> Result<()> {
    let renderer = CueRenderer::new(config.effective_sample_rate(), config.channels);
    let pcm = renderer.render(Registry::profile(category));
    write_wav(&pcm, path)?;
    println!("{} -> {}", Registry::display_name(category), path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.log_dir.as_deref(), args.verbose)?;

    let mut config = load_config(&args.config);
    if args.mute {
        config.enabled = false;
    }

    match args.command {
        Command::List => list(),
        Command::Render { category, output } => render(&config, category, &output)?,
        Command::Play { categories } => {
            let service = build_service(&config);
            for category in categories {
                info!(%category, name = service.sound_name(category), "Playing cue");
                service.play(category).await;
            }
        }
        Command::Test => {
            let service = build_service(&config);
            info!("Playing every category");
            service.play_all().await;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_play_categories() {
        let args = Args::try_parse_from(["chime", "play", "urgent", "Family"]).unwrap();
        match args.command {
            Command::Play { categories } => {
                assert_eq!(categories, vec![SoundCategory::Urgent, SoundCategory::Family]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!args.mute);
    }

    #[test]
    fn parse_rejects_unknown_category() {
        let err = Args::try_parse_from(["chime", "play", "spam"]).unwrap_err();
        assert!(err.to_string().contains("unknown sound category"));
    }

    #[test]
    fn parse_mute_after_subcommand() {
        let args = Args::try_parse_from(["chime", "test", "--mute"]).unwrap();
        assert!(args.mute);
        assert!(matches!(args.command, Command::Test));
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.json"));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn broken_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chime.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config(&path), EngineConfig::default());
    }

    #[test]
    fn render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.wav");
        let config = EngineConfig {
            sample_rate: 8_000,
            channels: 1,
            ..Default::default()
        };
        render(&config, SoundCategory::Games, &path).unwrap();
        assert!(path.exists());
    }
}
