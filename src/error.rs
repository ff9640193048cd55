use thiserror::Error;

/// Degenerate parameters or initial conditions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("carrying capacity K must be greater than zero when r1 is non-zero, got {0}")]
    NonPositiveCapacity(f64),
    #[error("fixed step must be greater than zero, got {0}")]
    NonPositiveStep(f64),
    #[error("months per unit must be greater than zero, got {0}")]
    NonPositiveScale(f64),
    #[error("updates per second must be greater than zero")]
    ZeroUpdateRate,
}

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigurationError),
}

/// Rejected form submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{field}: '{text}' is not a number")]
    InvalidNumber { field: &'static str, text: String },
    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}

/// Request the session cannot honour in its current state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("parameters can only change while the simulation is idle")]
    Busy,
    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}
