// Monitor configuration

use crate::hid::{DeviceResolver, FixedPathResolver, SysfsResolver, UsbId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// How readings are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Settings for a monitoring session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// USB id of the meter to look for
    pub device: UsbId,

    /// Open this node instead of scanning for `device`
    pub device_path: Option<PathBuf>,

    /// Number of readings to take, `None` to run until interrupted
    pub count: Option<usize>,

    /// Longest wait for a single frame
    #[serde(rename = "frame_timeout_ms", with = "duration_ms")]
    pub frame_timeout: Duration,

    pub output: OutputFormat,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            device: UsbId::peaktech_2025(),
            device_path: None,
            count: Some(5),
            frame_timeout: Duration::from_secs(2),
            output: OutputFormat::Text,
        }
    }
}

impl MonitorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == Some(0) {
            return Err(ConfigError::Invalid("count must be at least 1".to_string()));
        }
        if self.frame_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "frame timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_device(mut self, device: UsbId) -> Self {
        self.device = device;
        self
    }

    pub fn with_device_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.device_path = Some(path.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Read until interrupted
    pub fn forever(mut self) -> Self {
        self.count = None;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.frame_timeout = timeout;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Resolver honouring `device_path` when set
    pub fn resolver(&self) -> Box<dyn DeviceResolver> {
        match &self.device_path {
            Some(path) => Box::new(FixedPathResolver(path.clone())),
            None => Box::new(SysfsResolver::default()),
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
