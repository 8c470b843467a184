//! Patchwire CLI - replay pointer gestures against a rack and inspect config.

mod commands;

use clap::{Parser, Subcommand};
use patchwire_config::Settings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "patchwire")]
#[command(author, version, about = "Patchwire wire engine CLI", long_about = None)]
struct Cli {
    /// Settings file (defaults to settings.toml in the user config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a gesture scenario against a rack and print what happened
    Replay(commands::replay::ReplayArgs),

    /// Validate a rack file
    Check(commands::check::CheckArgs),

    /// Show config and rack directories
    Paths,
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let cli = Cli::parse();

    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(patchwire_config::settings_path);
    // Read the file up front for its log filter, but report a bad file only
    // once logging is up, and only to commands that use the settings.
    let loaded = Settings::load_or_default(&settings_path);
    let filter = loaded
        .as_ref()
        .map_or_else(|_| Settings::default().log_filter, |s| s.log_filter.clone());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &loaded {
        Ok(_) => tracing::debug!(path = %settings_path.display(), "settings loaded"),
        Err(err) => tracing::warn!(path = %settings_path.display(), error = %err, "settings unusable"),
    }

    match cli.command {
        Commands::Replay(args) => commands::replay::run(args, &loaded?),
        Commands::Check(args) => commands::check::run(args, &loaded?),
        Commands::Paths => {
            commands::paths::run(&settings_path);
            Ok(())
        }
    }
}
