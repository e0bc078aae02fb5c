//! Bridge configuration
//!
//! The defaults ship inside the library (`bridge.toml`, embedded at build
//! time) because an app process has no working directory to read from.
//! Loading order:
//! - embedded defaults
//! - the file named by `GREETING_BRIDGE_CONFIG`, if set
//! - `GREETING_BRIDGE_LOG_LEVEL` / `GREETING_BRIDGE_LOG_TAG` overrides
//!
//! followed by [`BridgeConfig::validate`].

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::symbol::NativeMethod;

/// Configuration shipped with the library
pub const DEFAULT_CONFIG: &str = include_str!("../bridge.toml");

pub const CONFIG_PATH_VAR: &str = "GREETING_BRIDGE_CONFIG";
pub const LOG_LEVEL_VAR: &str = "GREETING_BRIDGE_LOG_LEVEL";
pub const LOG_TAG_VAR: &str = "GREETING_BRIDGE_LOG_TAG";

/// Android truncates log tags longer than this on older releases
pub const MAX_LOG_TAG_LEN: usize = 23;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub logging: LoggingConfig,
    pub binding: BindingConfig,
}

/// Logger settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub tag: String,
    pub level: String,
}

/// Managed declaration the exported greeting function must satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    pub package: String,
    pub class: String,
    pub method: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tag: "GreetingBridge".to_string(),
            level: "info".to_string(),
        }
    }
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            package: "com.example.esp32_ble_interface_android".to_string(),
            class: "MainActivity".to_string(),
            method: "stringFromJNI".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| Error::Config(format!("Invalid log level: {}", self.level)))
    }
}

impl BindingConfig {
    pub fn native_method(&self) -> Result<NativeMethod> {
        NativeMethod::new(&self.package, &self.class, &self.method)
    }
}

impl BridgeConfig {
    /// Load the embedded defaults, then any override file and environment
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_VAR).ok();
        Self::load_with(path.as_deref().map(Path::new))
    }

    /// Like [`load`](Self::load) with an explicit file in place of the
    /// embedded defaults. Environment overrides and validation still apply.
    pub fn load_with(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::embedded()?,
        };

        config.override_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Parse the configuration compiled into the library
    pub fn embedded() -> Result<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&contents)
    }

    fn override_from_env(&mut self) {
        if let Ok(level) = env::var(LOG_LEVEL_VAR) {
            self.logging.level = level;
        }

        if let Ok(tag) = env::var(LOG_TAG_VAR) {
            self.logging.tag = tag;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.logging.tag.is_empty() {
            return Err(Error::Config("Log tag cannot be empty".to_string()));
        }

        if self.logging.tag.len() > MAX_LOG_TAG_LEN {
            return Err(Error::Config(format!(
                "Log tag must be at most {} bytes",
                MAX_LOG_TAG_LEN
            )));
        }

        self.logging.level_filter()?;
        self.binding.native_method()?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        fs::write(path, contents)
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}
