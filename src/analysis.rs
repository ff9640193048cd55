//! One-shot numerical experiments on a fixed time grid.
//!
//! Independent of the interactive loop: the trajectory is integrated with
//! classical fourth-order Runge-Kutta on `linspace(0, t_end, samples)`,
//! taking `substeps` RK4 steps between consecutive grid points.

use std::io::{self, Write};

use crate::error::ConfigurationError;
use crate::params::{InitialConditions, ModelParams};

#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub name: &'static str,
    pub params: ModelParams,
    pub initial: InitialConditions,
    pub t_end: f64,
    pub samples: usize,
    pub substeps: usize,
}

impl Experiment {
    /// Classic model without carrying capacity.
    pub fn classic() -> Self {
        Self {
            name: "classic",
            params: ModelParams {
                r1: 0.1,
                a1: 0.02,
                r2: 0.1,
                a2: 0.01,
                carrying_capacity: f64::INFINITY,
            },
            initial: InitialConditions::new(40.0, 9.0),
            t_end: 200.0,
            samples: 1000,
            substeps: 8,
        }
    }

    /// Rabbits and foxes with a carrying capacity, time in months.
    pub fn rabbits_and_foxes() -> Self {
        Self {
            name: "capacity",
            params: ModelParams {
                r1: 0.1,
                a1: 0.005,
                r2: 0.04,
                a2: 0.00004,
                carrying_capacity: 10_000.0,
            },
            initial: InitialConditions::new(200.0, 10.0),
            t_end: 400.0,
            samples: 1500,
            substeps: 8,
        }
    }

    pub fn presets() -> [Experiment; 2] {
        [Self::classic(), Self::rabbits_and_foxes()]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    pub time: Vec<f64>,
    pub prey: Vec<f64>,
    pub predator: Vec<f64>,
}

/// Extremes of both species over a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peaks {
    pub prey_min: f64,
    pub prey_max: f64,
    pub predator_min: f64,
    pub predator_max: f64,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn peaks(&self) -> Option<Peaks> {
        if self.is_empty() {
            return None;
        }
        let (prey_min, prey_max) = min_max(&self.prey);
        let (predator_min, predator_max) = min_max(&self.predator);
        Some(Peaks {
            prey_min,
            prey_max,
            predator_min,
            predator_max,
        })
    }

    pub fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "t,prey,predator")?;
        for ((t, prey), predator) in self.time.iter().zip(&self.prey).zip(&self.predator) {
            writeln!(out, "{t:.6},{prey:.6},{predator:.6}")?;
        }
        Ok(())
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Evenly spaced points over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let spacing = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + spacing * i as f64).collect()
        }
    }
}

fn rk4_step(params: &ModelParams, (x, y): (f64, f64), h: f64) -> (f64, f64) {
    let (k1x, k1y) = params.derivatives(x, y);
    let (k2x, k2y) = params.derivatives(x + 0.5 * h * k1x, y + 0.5 * h * k1y);
    let (k3x, k3y) = params.derivatives(x + 0.5 * h * k2x, y + 0.5 * h * k2y);
    let (k4x, k4y) = params.derivatives(x + h * k3x, y + h * k3y);
    let x = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
    let y = y + h / 6.0 * (k1y + 2.0 * k2y + 2.0 * k3y + k4y);
    (x.max(0.0), y.max(0.0))
}

pub fn solve(experiment: &Experiment) -> Result<Trajectory, ConfigurationError> {
    experiment.params.validate()?;
    experiment.initial.validate()?;

    let time = linspace(0.0, experiment.t_end, experiment.samples);
    let substeps = experiment.substeps.max(1);
    let mut trajectory = Trajectory {
        prey: Vec::with_capacity(time.len()),
        predator: Vec::with_capacity(time.len()),
        time: Vec::with_capacity(time.len()),
    };

    let mut state = (experiment.initial.prey, experiment.initial.predator);
    let mut previous = 0.0;
    for &t in &time {
        let h = (t - previous) / substeps as f64;
        if h > 0.0 {
            for _ in 0..substeps {
                state = rk4_step(&experiment.params, state, h);
            }
        }
        previous = t;
        trajectory.time.push(t);
        trajectory.prey.push(state.0);
        trajectory.predator.push(state.1);
    }

    log::debug!(
        "Solved '{}' over {} points with {} substeps",
        experiment.name,
        trajectory.len(),
        substeps
    );
    Ok(trajectory)
}
