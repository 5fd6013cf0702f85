use crate::models::HeroConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;

/// File name of the hero configuration inside the config directory.
pub const HERO_CONFIG_FILE: &str = "Hero Config.yaml";

/// Problems that make a loaded configuration unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Slider needs at least one slide")]
    NoSlides,

    #[error("Slider interval must be greater than zero")]
    ZeroInterval,

    #[error("Booking base URL is empty")]
    EmptyBaseUrl,

    #[error("Messaging number is empty")]
    EmptyMessagingNumber,
}

/// Configuration manager for loading and saving the YAML configuration file.
///
/// Manages `Hero Config.yaml` inside the configuration directory: booking
/// endpoint, slider slides and interval, messaging number and specialties,
/// navigation anchors and logging options.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    hero_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// The directory is created if it does not exist yet.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            hero_config_path: config_dir.join(HERO_CONFIG_FILE),
            config_dir,
        })
    }

    /// Load and validate the hero configuration.
    ///
    /// # Returns
    /// The loaded HeroConfig, or defaults if the file doesn't exist
    pub fn load_hero_config(&self) -> Result<HeroConfig> {
        if !self.hero_config_path.exists() {
            tracing::warn!(
                "Hero config file not found at {}, using defaults",
                self.hero_config_path
            );
            return Ok(HeroConfig::default());
        }

        let file_contents = fs::read_to_string(&self.hero_config_path)
            .with_context(|| format!("Failed to read hero config: {}", self.hero_config_path))?;

        let config: HeroConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse hero config: {}", self.hero_config_path))?;

        Self::validate(&config)
            .with_context(|| format!("Invalid hero config: {}", self.hero_config_path))?;

        tracing::info!("Loaded hero config from {}", self.hero_config_path);
        Ok(config)
    }

    /// Save the hero configuration file.
    pub fn save_hero_config(&self, config: &HeroConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize hero config to YAML")?;

        fs::write(&self.hero_config_path, yaml_string)
            .with_context(|| format!("Failed to write hero config: {}", self.hero_config_path))?;

        tracing::info!("Saved hero config to {}", self.hero_config_path);
        Ok(())
    }

    /// Check the invariants the hero relies on at startup.
    pub fn validate(config: &HeroConfig) -> Result<(), ConfigError> {
        if config.slider.slides.is_empty() {
            return Err(ConfigError::NoSlides);
        }
        if config.slider.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if config.booking.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if config.messaging.number.trim().is_empty() {
            return Err(ConfigError::EmptyMessagingNumber);
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn hero_config_path(&self) -> &Utf8Path {
        &self.hero_config_path
    }
}
