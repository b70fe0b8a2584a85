//! Rune Draw configuration system
//!
//! This crate provides centralized configuration for the replace transition
//! container, loading settings from `rune.toml` with environment variable
//! overrides on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`RuneConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuneConfig {
    /// Replace transition settings
    pub transition: TransitionConfig,
    /// Demo driver settings
    pub demo: DemoConfig,
}

/// Class names used by the transition.
///
/// Either a prefix (`"fade"` expands to `fade-enter`, `fade-leave`,
/// `fade-height`, ...) or an explicit set of class names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransitionName {
    Prefix(String),
    Classes(TransitionClasses),
}

/// Explicit class names, one per transition stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionClasses {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appear: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appear_active: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enter_active: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_active: Option<String>,
    /// Class applied to the container while its height is animated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

impl Default for TransitionName {
    fn default() -> Self {
        Self::Prefix("replace".to_string())
    }
}

impl TransitionName {
    /// Class applied to the container while a height override is active.
    pub fn height_class(&self) -> String {
        match self {
            Self::Prefix(prefix) => format!("{prefix}-height"),
            Self::Classes(classes) => classes.height.clone().unwrap_or_default(),
        }
    }

    /// The name handed to child transitions. Children never see the
    /// container's height class.
    pub fn without_height(&self) -> Self {
        match self {
            Self::Prefix(prefix) => Self::Prefix(prefix.clone()),
            Self::Classes(classes) => Self::Classes(TransitionClasses {
                height: None,
                ..classes.clone()
            }),
        }
    }
}

/// Replace transition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Class names for the transition stages
    pub transition_name: TransitionName,
    /// Run the appear transition for the very first child
    pub appear: bool,
    /// Run the enter transition for replacing children
    pub enter: bool,
    /// Run the leave transition for displaced children
    pub leave: bool,
    /// Advisory duration of the appear transition in milliseconds
    pub appear_timeout_ms: Option<u64>,
    /// Advisory duration of the enter transition in milliseconds
    pub enter_timeout_ms: Option<u64>,
    /// Advisory duration of the leave transition in milliseconds
    pub leave_timeout_ms: Option<u64>,
    /// Clip content overflowing the animated box
    pub clip_overflow: bool,
    /// Animate width in addition to height
    pub track_width: bool,
    /// Flag leaving children so they can alter their own rendering
    pub notify_leaving: bool,
}

/// Demo driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Scenario to run (tabs, wizard, collapse)
    pub scenario: Option<String>,
    /// Print every emitted transition event
    pub log_events: bool,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            transition_name: TransitionName::default(),
            appear: false,
            enter: true,
            leave: true,
            appear_timeout_ms: None,
            enter_timeout_ms: None,
            leave_timeout_ms: None,
            clip_overflow: true,
            track_width: false,
            notify_leaving: false,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            scenario: None,
            log_events: true,
        }
    }
}

impl TransitionConfig {
    pub fn appear_timeout(&self) -> Option<Duration> {
        self.appear_timeout_ms.map(Duration::from_millis)
    }

    pub fn enter_timeout(&self) -> Option<Duration> {
        self.enter_timeout_ms.map(Duration::from_millis)
    }

    pub fn leave_timeout(&self) -> Option<Duration> {
        self.leave_timeout_ms.map(Duration::from_millis)
    }

    /// Names of enabled transition stages that have no timeout.
    ///
    /// Without a timeout a child transition has no fallback for a missing
    /// end-of-transition signal.
    pub fn missing_timeouts(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.appear && self.appear_timeout_ms.is_none() {
            missing.push("appear");
        }
        if self.enter && self.enter_timeout_ms.is_none() {
            missing.push("enter");
        }
        if self.leave && self.leave_timeout_ms.is_none() {
            missing.push("leave");
        }
        missing
    }
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|val| val == "1" || val.eq_ignore_ascii_case("true"))
}

fn env_millis(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|val| val.parse::<u64>().ok())
}

impl RuneConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the rune.toml configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from the default location (rune.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("rune.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        let transition = &mut self.transition;

        if let Ok(name) = std::env::var("RUNE_TRANSITION_NAME") {
            transition.transition_name = TransitionName::Prefix(name);
        }
        if let Some(val) = env_flag("RUNE_TRANSITION_APPEAR") {
            transition.appear = val;
        }
        if let Some(val) = env_flag("RUNE_TRANSITION_ENTER") {
            transition.enter = val;
        }
        if let Some(val) = env_flag("RUNE_TRANSITION_LEAVE") {
            transition.leave = val;
        }
        if let Some(ms) = env_millis("RUNE_TRANSITION_APPEAR_TIMEOUT_MS") {
            transition.appear_timeout_ms = Some(ms);
        }
        if let Some(ms) = env_millis("RUNE_TRANSITION_ENTER_TIMEOUT_MS") {
            transition.enter_timeout_ms = Some(ms);
        }
        if let Some(ms) = env_millis("RUNE_TRANSITION_LEAVE_TIMEOUT_MS") {
            transition.leave_timeout_ms = Some(ms);
        }
        if let Some(val) = env_flag("RUNE_TRANSITION_CLIP_OVERFLOW") {
            transition.clip_overflow = val;
        }
        if let Some(val) = env_flag("RUNE_TRANSITION_TRACK_WIDTH") {
            transition.track_width = val;
        }
        if let Some(val) = env_flag("RUNE_TRANSITION_NOTIFY_LEAVING") {
            transition.notify_leaving = val;
        }

        if let Ok(scenario) = std::env::var("DEMO_SCENARIO") {
            self.demo.scenario = Some(scenario);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
