//! Centralized runtime settings for the terminal host
//!
//! This module provides the `Settings` struct consumed by the input loop, the
//! render loop and logging initialisation. Values come from defaults, an
//! optional JSON document, and `RAVEL_*` environment variables, in that order.

use ravel_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const POLL_INTERVAL_VAR: &str = "RAVEL_POLL_INTERVAL_MS";
pub const ANIMATION_INTERVAL_VAR: &str = "RAVEL_ANIMATION_INTERVAL_MS";
pub const AUTO_FOCUS_VAR: &str = "RAVEL_AUTO_FOCUS";
pub const LOG_FILTER_VAR: &str = "RAVEL_LOG";
pub const LOG_FILE_VAR: &str = "RAVEL_LOG_FILE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input: InputSettings,
    pub render: RenderSettings,
    pub log: LogSettings,
}

/// Keyboard polling behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Delay before re-polling when no key is available
    pub poll_interval_ms: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 16,
        }
    }
}

impl InputSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Repaint cadence while animated renderables are on screen
    pub animation_interval_ms: u64,

    /// Focus the first focusable node when nothing is focused
    pub auto_focus: bool,

    /// Paint on the alternate screen and restore the main one on exit
    pub alternate_screen: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            animation_interval_ms: 80,
            auto_focus: true,
            alternate_screen: true,
        }
    }
}

impl RenderSettings {
    pub fn animation_interval(&self) -> Duration {
        Duration::from_millis(self.animation_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,

    /// Write logs here instead of stderr; the terminal belongs to the painter
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| Error::configuration(format!("invalid settings document: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults overlaid with `RAVEL_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Overlay `RAVEL_*` environment variables onto these settings
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(ms) = env_parse::<u64>(POLL_INTERVAL_VAR)? {
            self.input.poll_interval_ms = ms;
        }
        if let Some(ms) = env_parse::<u64>(ANIMATION_INTERVAL_VAR)? {
            self.render.animation_interval_ms = ms;
        }
        if let Some(auto_focus) = env_parse::<bool>(AUTO_FOCUS_VAR)? {
            self.render.auto_focus = auto_focus;
        }
        if let Ok(filter) = std::env::var(LOG_FILTER_VAR) {
            self.log.filter = filter;
        }
        if let Ok(file) = std::env::var(LOG_FILE_VAR) {
            if !file.is_empty() {
                self.log.file = Some(PathBuf::from(file));
            }
        }
        self.validate()?;
        debug!(settings = ?self, "loaded runtime settings");
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.poll_interval_ms == 0 {
            return Err(Error::configuration(
                "input.poll_interval_ms must be greater than zero",
            ));
        }
        if self.render.animation_interval_ms == 0 {
            return Err(Error::configuration(
                "render.animation_interval_ms must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn env_parse<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::configuration(format!("{name}='{raw}': {e}"))),
        Err(_) => Ok(None),
    }
}
