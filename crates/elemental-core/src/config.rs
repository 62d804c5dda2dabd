//! Host-tunable simulation settings, loadable from TOML.

use crate::constants::{
    DAMPING, FIXED_STEP_HZ, INTERACTION_RANGE, MAX_CATCHUP_STEPS, PICK_SPHERE_RADIUS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Settings a host may override. Missing keys fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Velocity retained per frame, in (0, 1].
    pub damping: f32,
    /// Bodies further apart than this do not interact.
    pub interaction_range: f32,
    /// Rate of the fixed simulation step driven by `Simulation::tick`.
    pub fixed_step_hz: f32,
    /// Steps `tick` may run in one call before dropping the backlog.
    pub max_catchup_steps: u32,
    pub pick_radius: f32,
    /// Whether audio reactivity starts enabled.
    pub audio_enabled: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            interaction_range: INTERACTION_RANGE,
            fixed_step_hz: FIXED_STEP_HZ,
            max_catchup_steps: MAX_CATCHUP_STEPS,
            pick_radius: PICK_SPHERE_RADIUS,
            audio_enabled: false,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml_str(&text)?;
        log::info!("[config] loaded {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(invalid("damping", format!("{} not in (0, 1]", self.damping)));
        }
        if !(self.interaction_range > 0.0) {
            return Err(invalid(
                "interaction_range",
                format!("{} must be positive", self.interaction_range),
            ));
        }
        if !(self.fixed_step_hz > 0.0) {
            return Err(invalid(
                "fixed_step_hz",
                format!("{} must be positive", self.fixed_step_hz),
            ));
        }
        if self.max_catchup_steps == 0 {
            return Err(invalid("max_catchup_steps", "must be at least 1".into()));
        }
        if !(self.pick_radius > 0.0) {
            return Err(invalid(
                "pick_radius",
                format!("{} must be positive", self.pick_radius),
            ));
        }
        Ok(())
    }

    /// Seconds of simulated time per step.
    pub fn step_seconds(&self) -> f64 {
        1.0 / self.fixed_step_hz as f64
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
