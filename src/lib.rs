//! Predator-prey (Lotka-Volterra with carrying capacity) simulation core.
//!
//! [`session::Simulation`] drives a [`population::PopulationModel`], a
//! [`history::TimeSeriesRecorder`] and a [`clock::SimulationClock`] in
//! lockstep; the window binary only feeds it frame times and signals.

pub mod analysis;
pub mod clock;
pub mod config;
pub mod error;
pub mod form;
pub mod history;
pub mod params;
pub mod population;
pub mod session;

pub use config::SimulationConfig;
pub use error::{ConfigError, ConfigurationError, FormError, SessionError};
pub use params::{InitialConditions, ModelParams};
pub use population::PopulationModel;
pub use session::{RunState, Signal, Simulation};
