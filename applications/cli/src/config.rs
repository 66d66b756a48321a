/// CLI host configuration
use crate::error::{CliError, Result};
use podcastr_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    /// Wall-clock delay between ticks in milliseconds (0 runs flat out)
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Playback seconds the simulated handle advances per tick
    #[serde(default = "default_seconds_per_tick")]
    pub seconds_per_tick: f64,

    /// Upper bound on ticks, so a looping track still terminates
    #[serde(default = "default_max_ticks")]
    pub max_ticks: usize,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            seconds_per_tick: default_seconds_per_tick(),
            max_ticks: default_max_ticks(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from `podcastr.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from `path`, or from `podcastr.toml` when `None`
    ///
    /// An explicit path must exist. Environment variables prefixed with
    /// `PODCASTR_` override file values; nested keys use `__`, e.g.
    /// `PODCASTR_PLAYBACK__SHUFFLE_SEED=7`.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::from(path)),
            None => settings.add_source(config::File::with_name("podcastr").required(false)),
        };

        settings = settings.add_source(
            config::Environment::with_prefix("PODCASTR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.seconds_per_tick.is_finite() || self.seconds_per_tick <= 0.0 {
            return Err(CliError::Config(format!(
                "seconds_per_tick must be positive, got {}",
                self.seconds_per_tick
            )));
        }

        if self.max_ticks == 0 {
            return Err(CliError::Config("max_ticks must be at least 1".to_string()));
        }

        Ok(())
    }
}

// Default values
fn default_tick_ms() -> u64 {
    0
}

fn default_seconds_per_tick() -> f64 {
    15.0
}

fn default_max_ticks() -> usize {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let config = CliConfig::default();
        assert_eq!(config.tick_ms, 0);
        assert_eq!(config.seconds_per_tick, 15.0);
        assert_eq!(config.max_ticks, 10_000);
        assert_eq!(config.playback, PlaybackConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overrides_defaults() {
        let file = write_config(
            r#"
            seconds_per_tick = 30.0

            [playback]
            start_looping = true
            shuffle_seed = 42
            "#,
        );

        let config = CliConfig::load_from(Some(file.path())).unwrap();

        assert_eq!(config.seconds_per_tick, 30.0);
        assert_eq!(config.max_ticks, 10_000);
        assert!(config.playback.start_looping);
        assert!(!config.playback.start_shuffling);
        assert_eq!(config.playback.shuffle_seed, Some(42));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = CliConfig::load_from(Some(Path::new("/nonexistent/podcastr.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn rejects_non_positive_tick() {
        let config = CliConfig {
            seconds_per_tick: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            seconds_per_tick: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_max_ticks() {
        let file = write_config("max_ticks = 0");
        assert!(CliConfig::load_from(Some(file.path())).is_err());
    }
}
