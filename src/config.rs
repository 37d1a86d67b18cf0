use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::theme::{ThemeConfig, ThemeName};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chat variant to run
    pub theme: ThemeName,

    /// Artificial delay before the bot answers
    pub reply_delay_ms: u64,

    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,

    /// UI preferences
    pub ui: UiConfig,

    /// Where this config was loaded from
    #[serde(skip)]
    pub path: PathBuf,
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub show_timestamps: bool,
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_timestamps: true,
            tick_rate_ms: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theme: ThemeName::default(),
            reply_delay_ms: 1000,
            seed: None,
            ui: UiConfig::default(),
            path: Self::home_dir().join("config.toml"),
        }
    }
}

impl Config {
    /// `~/.printchat`, falling back to the working directory
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".printchat")
    }

    /// Load configuration from `path`, or `~/.printchat/config.toml`.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::home_dir().join("config.toml"),
        };

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            Self::parse(&content)?
        } else {
            Config::default()
        };

        config.path = config_path;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Save configuration to the file it was loaded from
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.path, content).context("Failed to write config file")?;
        Ok(())
    }

    pub fn theme(&self) -> ThemeConfig {
        self.theme.config()
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms.max(1))
    }
}
