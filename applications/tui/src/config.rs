//! Player configuration
use cadence_cms_client::{CmsConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

/// Environment variable prefix (`CADENCE_CMS__BASE_URL`, ...)
pub const ENV_PREFIX: &str = "CADENCE";

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_cms")]
    pub cms: CmsSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_ui")]
    pub ui: UiSettings,

    #[serde(default = "default_log")]
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CmsSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    #[serde(default = "default_volume")]
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Drag distance, in logical pixels, that counts as a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f32,

    /// Logical pixels per terminal cell when converting mouse drags
    #[serde(default = "default_cell_px")]
    pub cell_px: f32,

    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LogSettings {
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `cadence.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(
            path,
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
    }

    pub(crate) fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with CADENCE_)
        settings = settings.add_source(env);

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.cms.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "CMS base URL is required (set CADENCE_CMS__BASE_URL)".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(ConfigError::Invalid(format!(
                "Volume {} is outside 0.0..=1.0",
                self.playback.volume
            )));
        }

        if self.playback.progress_interval_ms == 0 || self.ui.tick_ms == 0 {
            return Err(ConfigError::Invalid("Intervals must be greater than zero".to_string()));
        }

        if self.cms.timeout_secs == 0 {
            return Err(ConfigError::Invalid("CMS timeout must be greater than zero".to_string()));
        }

        if self.ui.swipe_threshold <= 0.0 || self.ui.cell_px <= 0.0 {
            return Err(ConfigError::Invalid(
                "Swipe threshold and cell size must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn cms_config(&self) -> CmsConfig {
        CmsConfig::new(self.cms.base_url.clone()).with_timeout(Duration::from_secs(self.cms.timeout_secs))
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.playback.progress_interval_ms)
    }
}

impl UiSettings {
    /// Redraw interval when nothing else happens
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

// Default values
fn default_cms() -> CmsSettings {
    CmsSettings {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        progress_interval_ms: default_progress_interval_ms(),
        volume: default_volume(),
    }
}

fn default_progress_interval_ms() -> u64 {
    1000
}

fn default_volume() -> f32 {
    1.0
}

fn default_ui() -> UiSettings {
    UiSettings {
        swipe_threshold: default_swipe_threshold(),
        cell_px: default_cell_px(),
        tick_ms: default_tick_ms(),
    }
}

fn default_swipe_threshold() -> f32 {
    cadence_playback::SWIPE_THRESHOLD
}

fn default_cell_px() -> f32 {
    10.0
}

fn default_tick_ms() -> u64 {
    250
}

fn default_log() -> LogSettings {
    LogSettings {
        file: default_log_file(),
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from("cadence.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cms: default_cms(),
            playback: default_playback(),
            ui: default_ui(),
            log: default_log(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(Some(map))
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cms.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.progress_interval(), Duration::from_secs(1));
        assert_eq!(config.ui.tick(), Duration::from_millis(250));
    }

    #[test]
    fn file_overrides_defaults() {
        let file = toml_file(
            r#"
            [cms]
            base_url = "http://localhost:8055"

            [ui]
            cell_px = 12.5
            "#,
        );

        let config = AppConfig::load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.cms.base_url, "http://localhost:8055");
        assert_eq!(config.ui.cell_px, 12.5);
        assert_eq!(config.cms.timeout_secs, 30);
        assert_eq!(config.playback.volume, 1.0);
    }

    #[test]
    fn env_overrides_file() {
        let file = toml_file("[playback]\nvolume = 0.4\n");
        let config = AppConfig::load_with_env(
            Some(file.path()),
            env(&[
                ("CADENCE_PLAYBACK__VOLUME", "0.7"),
                ("CADENCE_CMS__TIMEOUT_SECS", "5"),
            ]),
        )
        .unwrap();

        assert_eq!(config.playback.volume, 0.7);
        assert_eq!(config.cms.timeout_secs, 5);
        assert_eq!(config.cms_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load_with_env(Some(Path::new("/nonexistent/cadence.toml")), env(&[]));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.cms.base_url = "  ".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.playback.volume = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.playback.progress_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ui.tick_ms = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ui.cell_px = 0.0;
        assert!(config.validate().is_err());
    }
}
