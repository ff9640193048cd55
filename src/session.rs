//! The driving loop's view of a run: model, recorder and clock updated in
//! lockstep, gated by an `Idle -> Running -> Stopped` state machine.

use crate::clock::SimulationClock;
use crate::config::SimulationConfig;
use crate::error::SessionError;
use crate::history::TimeSeriesRecorder;
use crate::population::PopulationModel;

/// Upper bound on fixed steps drained by one tick. Backlog beyond this is
/// dropped so a stalled frame cannot freeze the loop.
pub const MAX_STEPS_PER_TICK: usize = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Start,
    Stop,
    Reset,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    model: PopulationModel,
    history: TimeSeriesRecorder,
    clock: SimulationClock,
    state: RunState,
    pending: f64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let model = PopulationModel::new(config.initial, config.params)?;
        Ok(Self {
            clock: SimulationClock::new(config.months_per_unit),
            config,
            model,
            history: TimeSeriesRecorder::new(),
            state: RunState::Idle,
            pending: 0.0,
        })
    }

    /// Swap in new parameters and initial conditions. Only allowed while idle.
    pub fn configure(&mut self, config: SimulationConfig) -> Result<(), SessionError> {
        if self.state != RunState::Idle {
            return Err(SessionError::Busy);
        }
        config.validate()?;
        self.model.reset(config.initial, config.params)?;
        self.config = config;
        self.clear_run();
        Ok(())
    }

    pub fn handle(&mut self, signal: Signal) -> RunState {
        match (self.state, signal) {
            (RunState::Idle, Signal::Start) => {
                log::info!(
                    "Simulation started: prey={:.1} predator={:.1}",
                    self.model.prey(),
                    self.model.predator()
                );
                self.state = RunState::Running;
            }
            (RunState::Stopped, Signal::Start) => {
                log::warn!("Start ignored: run is stopped, reset first");
            }
            (RunState::Running, Signal::Start) | (RunState::Stopped, Signal::Stop) => {}
            (_, Signal::Stop) => {
                log::info!(
                    "Simulation stopped after {} ticks ({} months)",
                    self.history.len(),
                    self.clock.whole_months()
                );
                self.state = RunState::Stopped;
            }
            (_, Signal::Reset) => {
                self.reset();
                log::info!("Simulation reset");
            }
        }
        self.state
    }

    /// Feed one frame's elapsed time. Returns how many model steps were taken.
    pub fn tick(&mut self, dt: f64) -> usize {
        if self.state != RunState::Running {
            return 0;
        }
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        match self.config.fixed_step {
            None => {
                self.step(dt);
                1
            }
            Some(step) => {
                self.pending += dt;
                let mut steps = 0;
                while self.pending >= step && steps < MAX_STEPS_PER_TICK {
                    self.step(step);
                    self.pending -= step;
                    steps += 1;
                }
                if steps == MAX_STEPS_PER_TICK && self.pending >= step {
                    log::debug!("Dropping {:.3} units of step backlog", self.pending);
                    self.pending %= step;
                }
                steps
            }
        }
    }

    fn step(&mut self, dt: f64) {
        let (prey, predator) = self.model.advance(dt);
        self.history.append(prey, predator);
        self.clock.advance(dt);
    }

    fn reset(&mut self) {
        // Already validated when it became the active config.
        if let Err(err) = self.model.reset(self.config.initial, self.config.params) {
            log::error!("Reset with invalid config: {err}");
        }
        self.clear_run();
        self.state = RunState::Idle;
    }

    fn clear_run(&mut self) {
        self.history.clear();
        self.clock = SimulationClock::new(self.config.months_per_unit);
        self.pending = 0.0;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn model(&self) -> &PopulationModel {
        &self.model
    }

    pub fn history(&self) -> &TimeSeriesRecorder {
        &self.history
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{InitialConditions, ModelParams};

    fn running() -> Simulation {
        let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
        assert_eq!(sim.handle(Signal::Start), RunState::Running);
        sim
    }

    #[test]
    fn idle_and_stopped_do_not_advance() {
        let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
        assert_eq!(sim.tick(0.1), 0);
        assert!(sim.history().is_empty());

        sim.handle(Signal::Start);
        sim.tick(0.1);
        sim.handle(Signal::Stop);
        let frozen = sim.model().state();
        assert_eq!(sim.tick(0.1), 0);
        assert_eq!(sim.model().state(), frozen);
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn stopped_needs_reset_before_start() {
        let mut sim = running();
        sim.handle(Signal::Stop);
        assert_eq!(sim.handle(Signal::Start), RunState::Stopped);
        assert_eq!(sim.handle(Signal::Reset), RunState::Idle);
        assert_eq!(sim.handle(Signal::Start), RunState::Running);
    }

    #[test]
    fn recorder_aligns_with_advances() {
        let mut sim = running();
        let mut expected = Vec::new();
        let mut shadow =
            PopulationModel::new(InitialConditions::default(), ModelParams::default()).unwrap();
        for i in 0..45 {
            let dt = if i % 2 == 0 { 1.0 / 30.0 } else { 1.0 / 60.0 };
            sim.tick(dt);
            expected.push(shadow.advance(dt));
        }
        let recorded: Vec<(f64, f64)> = sim
            .history()
            .snapshot()
            .iter()
            .map(|s| (s.prey, s.predator))
            .collect();
        assert_eq!(recorded, expected);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut sim = running();
        for _ in 0..30 {
            sim.tick(1.0 / 30.0);
        }
        assert!(sim.clock().elapsed() > 3.9);

        sim.handle(Signal::Reset);
        assert_eq!(sim.state(), RunState::Idle);
        assert_eq!(sim.model().state(), (400.0, 5.0));
        assert!(sim.history().is_empty());
        assert_eq!(sim.clock().elapsed(), 0.0);

        sim.handle(Signal::Reset);
        assert_eq!(sim.model().state(), (400.0, 5.0));
    }

    #[test]
    fn configure_only_when_idle() {
        let mut sim = running();
        let config = SimulationConfig {
            initial: InitialConditions::new(10.0, 1.0),
            ..Default::default()
        };
        assert_eq!(sim.configure(config.clone()), Err(SessionError::Busy));

        sim.handle(Signal::Reset);
        sim.configure(config).unwrap();
        assert_eq!(sim.model().state(), (10.0, 1.0));
    }

    #[test]
    fn configure_rejects_degenerate_params_and_keeps_old_ones() {
        let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
        let bad = SimulationConfig {
            params: ModelParams {
                carrying_capacity: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(sim.configure(bad), Err(SessionError::Invalid(_))));
        assert_eq!(sim.config(), &SimulationConfig::default());
    }

    #[test]
    fn fixed_step_is_independent_of_frame_rate() {
        let config = SimulationConfig {
            fixed_step: Some(0.01),
            ..Default::default()
        };
        let mut at_30 = Simulation::new(config.clone()).unwrap();
        let mut at_60 = Simulation::new(config).unwrap();
        at_30.handle(Signal::Start);
        at_60.handle(Signal::Start);

        // 0.5 units each: 15 frames of 1/30 and 30 frames of 1/60.
        for _ in 0..15 {
            at_30.tick(1.0 / 30.0);
        }
        for _ in 0..30 {
            at_60.tick(1.0 / 60.0);
        }

        let diff = at_30.history().len() as i64 - at_60.history().len() as i64;
        assert!(diff.abs() <= 1);
        let common = at_30.history().len().min(at_60.history().len());
        assert_eq!(
            at_30.history().snapshot()[..common],
            at_60.history().snapshot()[..common]
        );
    }

    #[test]
    fn invalid_dt_counts_as_zero() {
        let mut sim = running();
        sim.tick(-1.0);
        sim.tick(f64::NAN);
        assert_eq!(sim.model().state(), (400.0, 5.0));
        assert_eq!(sim.history().len(), 2);
        assert_eq!(sim.clock().elapsed(), 0.0);
    }

    #[test]
    fn bad_frame_delta_does_not_wipe_out_huge_population() {
        let config = SimulationConfig {
            initial: InitialConditions::new(1e200, 5.0),
            ..Default::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.handle(Signal::Start);
        sim.tick(-1.0);
        sim.tick(f64::NAN);
        assert_eq!(sim.model().state(), (1e200, 5.0));
        assert_eq!(sim.history().len(), 2);
    }

    #[test]
    fn backlog_is_capped() {
        let config = SimulationConfig {
            fixed_step: Some(0.001),
            ..Default::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.handle(Signal::Start);
        assert_eq!(sim.tick(10.0), MAX_STEPS_PER_TICK);
        assert!(sim.tick(0.0) <= 1);
    }
}
