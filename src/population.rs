//! Prey and predator counts advanced by explicit Euler steps.
//!
//! The step size is whatever the caller hands to [`PopulationModel::advance`],
//! so a frame-driven caller gets trajectories that depend slightly on its
//! frame rate. [`crate::session::Simulation`] can decouple the two with a
//! fixed step.

use crate::error::ConfigurationError;
use crate::params::{InitialConditions, ModelParams};

#[derive(Debug, Clone, PartialEq)]
pub struct PopulationModel {
    prey: f64,
    predator: f64,
    params: ModelParams,
}

impl PopulationModel {
    pub fn new(
        initial: InitialConditions,
        params: ModelParams,
    ) -> Result<Self, ConfigurationError> {
        initial.validate()?;
        params.validate()?;
        Ok(Self {
            prey: initial.prey,
            predator: initial.predator,
            params,
        })
    }

    /// Replace the whole state. Calling it twice with the same inputs is the
    /// same as calling it once.
    pub fn reset(
        &mut self,
        initial: InitialConditions,
        params: ModelParams,
    ) -> Result<(), ConfigurationError> {
        *self = Self::new(initial, params)?;
        Ok(())
    }

    /// Advance by one Euler step of length `dt` and return the new
    /// `(prey, predator)` pair.
    ///
    /// Negative results are extinction and clamp to zero. There is no upper
    /// clamp; overflow to NaN also lands on zero.
    pub fn advance(&mut self, dt: f64) -> (f64, f64) {
        // An overflowed derivative times zero is NaN, which would clamp to 0.
        if dt == 0.0 {
            return (self.prey, self.predator);
        }
        let (d_prey, d_predator) = self.params.derivatives(self.prey, self.predator);
        self.prey = (self.prey + d_prey * dt).max(0.0);
        self.predator = (self.predator + d_predator * dt).max(0.0);
        (self.prey, self.predator)
    }

    pub fn prey(&self) -> f64 {
        self.prey
    }

    pub fn predator(&self) -> f64 {
        self.predator
    }

    pub fn state(&self) -> (f64, f64) {
        (self.prey, self.predator)
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    pub fn is_extinct(&self) -> bool {
        self.prey == 0.0 && self.predator == 0.0
    }
}
