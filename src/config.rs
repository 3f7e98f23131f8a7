use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::fetch::DEFAULT_CELESTRAK_URL;
use crate::groundtrack::{TrackSettings, DEFAULT_SAMPLES, DEFAULT_SPLIT_THRESHOLD_DEG};
use crate::session::TrackedObject;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub satellites: Vec<SatelliteConfig>,
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub source: SourceConfig,
    #[serde(default)]
    pub track: TrackConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub default_selection: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteConfig {
    pub id: u32,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceConfig {
    Celestrak(String),
    Directory(PathBuf),
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Celestrak(DEFAULT_CELESTRAK_URL.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackConfig {
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_split_threshold")]
    pub split_threshold_deg: f64,
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

fn default_split_threshold() -> f64 {
    DEFAULT_SPLIT_THRESHOLD_DEG
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            split_threshold_deg: DEFAULT_SPLIT_THRESHOLD_DEG,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    #[serde(
        default = "default_refresh_interval",
        deserialize_with = "deserialize_duration"
    )]
    pub interval: Duration,
}

fn default_refresh_interval() -> Duration {
    crate::session::DEFAULT_REFRESH_INTERVAL
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: default_refresh_interval(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.satellites.is_empty() {
            return invalid("at least one satellite is required".into());
        }

        let mut seen = HashSet::new();
        for sat in &self.satellites {
            if !seen.insert(sat.id) {
                return invalid(format!("duplicate satellite id {}", sat.id));
            }
        }

        if self.track.samples == 0 {
            return invalid("track.samples must be at least 1".into());
        }

        let threshold = self.track.split_threshold_deg;
        if !threshold.is_finite() || threshold <= 0.0 || threshold > 360.0 {
            return invalid(format!(
                "track.split_threshold_deg must be in (0, 360], got {}",
                threshold
            ));
        }

        if self.refresh.interval.is_zero() {
            return invalid("refresh.interval must be positive".into());
        }

        if let Some(id) = self.default_selection {
            if !seen.contains(&id) {
                return invalid(format!("default_selection {} is not configured", id));
            }
        }

        Ok(())
    }

    pub fn track_settings(&self) -> TrackSettings {
        TrackSettings {
            samples: self.track.samples,
            split_threshold_deg: self.track.split_threshold_deg,
        }
    }

    /// Track settings with an optional sample count override.
    pub fn track_settings_with(
        &self,
        samples: Option<usize>,
    ) -> Result<TrackSettings, ConfigError> {
        let mut settings = self.track_settings();
        match samples {
            Some(0) => Err(ConfigError::Invalid("samples must be at least 1".into())),
            Some(n) => {
                settings.samples = n;
                Ok(settings)
            }
            None => Ok(settings),
        }
    }

    pub fn tracked_objects(&self) -> Vec<TrackedObject> {
        self.satellites
            .iter()
            .map(|s| TrackedObject::new(s.id, s.name.clone(), s.color.clone()))
            .collect()
    }

    /// Object drawn when the session starts.
    pub fn initial_selection(&self) -> Option<u32> {
        self.default_selection
            .or_else(|| self.satellites.first().map(|s| s.id))
    }
}
