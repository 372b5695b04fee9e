//! # Settings
//!
//! Tunables for the demo wiring. Nothing in the store, repository or
//! controllers reads these directly; [`DeliverySystem`](crate::lifecycle::DeliverySystem)
//! and the binary inject them.
//!
//! Sources, later wins:
//!
//! 1. [`Settings::default`]
//! 2. `delivery.toml` in the working directory, if present
//! 3. `DELIVERY__*` environment variables
//!
//! ```toml
//! fetch_delay_ms = 2000
//! update_delay_ms = 500
//! tick_interval_ms = 3000
//! store_buffer = 32
//! should_fail = false
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const SETTINGS_FILE: &str = "delivery.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulated latency of `list_orders`.
    pub fetch_delay_ms: u64,
    /// Simulated latency of `update_order`.
    pub update_delay_ms: u64,
    /// Period of the detail controller's status tick.
    pub tick_interval_ms: u64,
    /// Capacity of the order store's request channel.
    pub store_buffer: usize,
    /// Makes `list_orders` fail.
    pub should_fail: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fetch_delay_ms: 2_000,
            update_delay_ms: 500,
            tick_interval_ms: 3_000,
            store_buffer: 32,
            should_fail: false,
        }
    }
}

impl Settings {
    /// Defaults with every delay zeroed.
    pub fn for_tests() -> Self {
        Self {
            fetch_delay_ms: 0,
            update_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn update_delay(&self) -> Duration {
        Duration::from_millis(self.update_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Applies `DELIVERY__*` overrides read through `lookup`.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        override_from(&lookup, "DELIVERY__FETCH_DELAY_MS", &mut self.fetch_delay_ms);
        override_from(&lookup, "DELIVERY__UPDATE_DELAY_MS", &mut self.update_delay_ms);
        override_from(&lookup, "DELIVERY__TICK_INTERVAL_MS", &mut self.tick_interval_ms);
        override_from(&lookup, "DELIVERY__STORE_BUFFER", &mut self.store_buffer);
        override_from(&lookup, "DELIVERY__SHOULD_FAIL", &mut self.should_fail);
    }
}

fn override_from<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(value) => {
                debug!(key, "Settings override applied");
                *target = value;
            }
            Err(_) => warn!(key, value = %raw, "Ignoring unparseable settings override"),
        }
    }
}

/// Loads settings from `delivery.toml` (if present) and the environment.
pub fn load_settings() -> Settings {
    let mut settings = if Path::new(SETTINGS_FILE).exists() {
        match Settings::from_file(SETTINGS_FILE) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Falling back to default settings");
                Settings::default()
            }
        }
    } else {
        Settings::default()
    };

    settings.apply_overrides(|key| std::env::var(key).ok());
    settings
}
