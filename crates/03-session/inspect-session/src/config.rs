//! Runtime tunables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Server-side inspect settings, loadable from TOML.
///
/// Missing keys take their defaults:
///
/// ```toml
/// enabled = true
/// deploy_cooldown = 0.5
/// reload_cooldown = 0.3
/// min_duration = 1.0
/// max_duration = 12.0
/// max_starts_per_window = 3
/// inspect_impulse = 100
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    pub enabled: bool,
    /// Extra cooldown after drawing a weapon.
    pub deploy_cooldown: f64,
    /// Extra cooldown after a reload's own delay.
    pub reload_cooldown: f64,
    pub min_duration: f64,
    pub max_duration: f64,
    /// Successful starts allowed per second; zero or less disables the limit.
    pub max_starts_per_window: i32,
    /// Impulse code that requests an inspect.
    pub inspect_impulse: u8,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            deploy_cooldown: 0.5,
            reload_cooldown: 0.3,
            min_duration: 1.0,
            max_duration: 12.0,
            max_starts_per_window: 3,
            inspect_impulse: 100,
        }
    }
}

impl InspectConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: InspectConfig = toml::from_str(text).context("parsing inspect config")?;
        Ok(config.sanitized())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("loading {}", path.display()))
    }

    /// Negative or non-finite values floored to zero, duration bounds ordered.
    pub fn sanitized(mut self) -> Self {
        fn floor(v: f64) -> f64 {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                0.0
            }
        }
        self.deploy_cooldown = floor(self.deploy_cooldown);
        self.reload_cooldown = floor(self.reload_cooldown);
        self.min_duration = floor(self.min_duration);
        self.max_duration = floor(self.max_duration);
        if self.min_duration > self.max_duration {
            std::mem::swap(&mut self.min_duration, &mut self.max_duration);
        }
        self
    }

    /// Session length for an estimated animation duration.
    pub fn clamp_duration(&self, duration: f64) -> f64 {
        if duration.is_nan() {
            return self.min_duration;
        }
        duration.max(self.min_duration).min(self.max_duration)
    }
}
