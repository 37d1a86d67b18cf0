use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use strum::IntoEnumIterator;
use tracing_subscriber::EnvFilter;

mod catalog;
mod config;
mod conversation;
mod events;
mod replay;
mod theme;
mod ui;

use config::Config;
use replay::OutputFormat;
use theme::ThemeName;

#[derive(Parser)]
#[command(name = "printchat")]
#[command(version = "0.1.0")]
#[command(about = "Scripted support chat for Jone Jones 3D Printers", long_about = None)]
struct Cli {
    /// Chat theme (teal, floating, slate)
    #[arg(long, global = true)]
    theme: Option<ThemeName>,

    /// Path to config.toml (default: ~/.printchat/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fixed RNG seed for reproducible replies
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Reply delay in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a script against the bot and print the transcript
    Replay {
        /// Script file; reads stdin when omitted
        script: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the built-in themes
    Themes,
    /// Print the effective configuration
    Config {
        /// Write it back to the config file
        #[arg(long)]
        save: bool,
    },
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(delay_ms) = self.delay_ms {
            config.reply_delay_ms = delay_ms;
        }
        Ok(config)
    }
}

/// Log to stderr, or to `~/.printchat/printchat.log` while the TUI owns the terminal
fn init_logging(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if to_file {
        let log_dir = Config::home_dir();
        fs::create_dir_all(&log_dir).context("Failed to create .printchat directory")?;
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("printchat.log"))
            .context("Failed to open log file")?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn list_themes() {
    println!("🎨 Built-in themes:\n");
    for theme in ThemeName::iter() {
        let name: &'static str = theme.into();
        println!("  • {:<9} {} ({})", name, theme.config().title, theme.description());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.is_none())?;
    let config = cli.load_config()?;

    match &cli.command {
        None => ui::tui::run(&config),
        Some(Commands::Replay { script, format }) => {
            replay::replay(&config, script.as_deref(), *format).await
        }
        Some(Commands::Themes) => {
            list_themes();
            Ok(())
        }
        Some(Commands::Config { save }) => {
            print!("{}", toml::to_string_pretty(&config).context("Failed to serialize config")?);
            if *save {
                config.save()?;
                println!("\n✅ Saved to {}", config.path.display());
            }
            Ok(())
        }
    }
}
