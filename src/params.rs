use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Rates of the Lotka-Volterra system with logistic prey growth:
///
///   dPrey/dt     = r1 * prey * (1 - prey / K) - a1 * prey * predator
///   dPredator/dt = a2 * prey * predator - r2 * predator
///
/// An infinite `K` gives the classic model without a carrying capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Prey growth rate
    pub r1: f64,
    /// Predation rate
    pub a1: f64,
    /// Predator death rate
    pub r2: f64,
    /// Prey-to-predator conversion rate
    pub a2: f64,
    /// Carrying capacity of the prey
    #[serde(alias = "K", alias = "k")]
    pub carrying_capacity: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            r1: 0.8,
            a1: 0.007,
            r2: 0.2,
            a2: 0.0004,
            carrying_capacity: 1000.0,
        }
    }
}

impl ModelParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        finite("r1", self.r1)?;
        for (name, value) in [("a1", self.a1), ("r2", self.r2), ("a2", self.a2)] {
            non_negative(name, finite(name, value)?)?;
        }
        if self.carrying_capacity.is_nan() {
            return Err(ConfigurationError::NonFinite {
                name: "K",
                value: self.carrying_capacity,
            });
        }
        if self.r1 != 0.0 && self.carrying_capacity <= 0.0 {
            return Err(ConfigurationError::NonPositiveCapacity(
                self.carrying_capacity,
            ));
        }
        Ok(())
    }

    /// Instantaneous rates of change at `(prey, predator)`.
    pub fn derivatives(&self, prey: f64, predator: f64) -> (f64, f64) {
        let growth = if self.r1 == 0.0 {
            0.0
        } else {
            self.r1 * prey * (1.0 - prey / self.carrying_capacity)
        };
        let d_prey = growth - self.a1 * prey * predator;
        let d_predator = self.a2 * prey * predator - self.r2 * predator;
        (d_prey, d_predator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    pub prey: f64,
    pub predator: f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            prey: 400.0,
            predator: 5.0,
        }
    }
}

impl InitialConditions {
    pub fn new(prey: f64, predator: f64) -> Self {
        Self { prey, predator }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        non_negative("initial prey", finite("initial prey", self.prey)?)?;
        non_negative("initial predator", finite("initial predator", self.predator)?)?;
        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> Result<f64, ConfigurationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::NonFinite { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64, ConfigurationError> {
    if value < 0.0 {
        Err(ConfigurationError::Negative { name, value })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ModelParams::default().validate().is_ok());
        assert!(InitialConditions::default().validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected_when_prey_grows() {
        let params = ModelParams {
            carrying_capacity: 0.0,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigurationError::NonPositiveCapacity(0.0))
        );
    }

    #[test]
    fn zero_capacity_is_allowed_without_prey_growth() {
        let params = ModelParams {
            r1: 0.0,
            carrying_capacity: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
        let (d_prey, _) = params.derivatives(100.0, 0.0);
        assert_eq!(d_prey, 0.0);
    }

    #[test]
    fn negative_and_nan_rates_are_rejected() {
        let negative = ModelParams {
            a2: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigurationError::Negative { name: "a2", .. })
        ));

        let nan = ModelParams {
            r1: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(ConfigurationError::NonFinite { name: "r1", .. })
        ));
    }

    #[test]
    fn infinite_capacity_reduces_to_classic_model() {
        let params = ModelParams {
            r1: 0.1,
            a1: 0.02,
            r2: 0.1,
            a2: 0.01,
            carrying_capacity: f64::INFINITY,
        };
        assert!(params.validate().is_ok());
        let (d_prey, d_predator) = params.derivatives(40.0, 9.0);
        assert!((d_prey - (0.1 * 40.0 - 0.02 * 40.0 * 9.0)).abs() < 1e-12);
        assert!((d_predator - (0.01 * 40.0 * 9.0 - 0.1 * 9.0)).abs() < 1e-12);
    }

    #[test]
    fn negative_initial_population_is_rejected() {
        let initial = InitialConditions::new(-1.0, 5.0);
        assert!(initial.validate().is_err());
    }
}
