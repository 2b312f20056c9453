//! Layered TOML configuration.
//!
//! Bundled defaults are always present; `./comicforge.toml` and
//! `~/.config/comicforge/comicforge.toml` override them, with the local
//! file winning.

use comicforge_batch::RetryPolicy;
use comicforge_error::{ComicforgeResult, ConfigError};
use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../comicforge.toml");

/// Generation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationSettings {
    /// Image model name
    pub model: String,
    /// Retry attempts per task, including the first
    pub max_attempts: u32,
    /// Base retry delay in milliseconds, scaled by the attempt number
    pub base_delay_ms: u64,
}

/// Document-store settings for the admin workflow.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FirestoreSettings {
    /// Firestore project id; required only for `users` commands
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Top-level configuration.
///
/// # Examples
///
/// ```no_run
/// use comicforge::ComicforgeConfig;
///
/// let config = ComicforgeConfig::load()?;
/// println!("model: {}", config.generation.model);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComicforgeConfig {
    /// Generation settings
    pub generation: GenerationSettings,
    /// Document-store settings
    #[serde(default)]
    pub firestore: FirestoreSettings,
}

impl ComicforgeConfig {
    /// Load configuration, merging bundled defaults with user overrides.
    pub fn load() -> ComicforgeResult<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("comicforge").join("comicforge.toml");
            builder = builder.add_source(File::from(user_path).required(false));
            debug!("Added user config source");
        }

        builder = builder.add_source(File::new("comicforge", FileFormat::Toml).required(false));

        let config = builder
            .build()
            .map_err(|e| ConfigError::new(e.to_string()))?
            .try_deserialize::<ComicforgeConfig>()
            .map_err(|e| ConfigError::new(e.to_string()))?;
        Ok(config)
    }

    /// Retry policy derived from the generation settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.generation.max_attempts,
            Duration::from_millis(self.generation.base_delay_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_parse() {
        let config: ComicforgeConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.generation.model, "gemini-3-pro-image-preview");
        assert_eq!(config.generation.max_attempts, 3);
        assert_eq!(config.generation.base_delay_ms, 1000);
        assert!(config.firestore.project_id.is_none());
    }

    #[test]
    fn retry_policy_uses_configured_schedule() {
        let config: ComicforgeConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(1000));
    }
}
