//! Run configuration, loadable from YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::MONTHS_PER_UNIT;
use crate::error::{ConfigError, ConfigurationError};
use crate::params::{InitialConditions, ModelParams};

/// Everything needed to (re)start a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub params: ModelParams,
    pub initial: InitialConditions,
    /// Simulated months per unit of model time
    pub months_per_unit: f64,
    /// When set, frame deltas are accumulated and drained in steps of this
    /// size instead of being fed to the model directly
    pub fixed_step: Option<f64>,
    /// Update events per second requested from the window
    pub updates_per_second: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            params: ModelParams::default(),
            initial: InitialConditions::default(),
            months_per_unit: MONTHS_PER_UNIT,
            fixed_step: None,
            updates_per_second: 30,
        }
    }
}

impl SimulationConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.params.validate()?;
        self.initial.validate()?;
        if !(self.months_per_unit > 0.0 && self.months_per_unit.is_finite()) {
            return Err(ConfigurationError::NonPositiveScale(self.months_per_unit));
        }
        if let Some(step) = self.fixed_step {
            if !(step > 0.0 && step.is_finite()) {
                return Err(ConfigurationError::NonPositiveStep(step));
            }
        }
        if self.updates_per_second == 0 {
            return Err(ConfigurationError::ZeroUpdateRate);
        }
        Ok(())
    }
}
