/// Simulated months elapsed at the original pacing.
pub const MONTHS_PER_UNIT: f64 = 4.0;

/// Converts the dt fed to the model into simulated months. Display only; the
/// model never reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    elapsed: f64,
    months_per_unit: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(MONTHS_PER_UNIT)
    }
}

impl SimulationClock {
    pub fn new(months_per_unit: f64) -> Self {
        Self {
            elapsed: 0.0,
            months_per_unit,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        if dt > 0.0 {
            self.elapsed += dt * self.months_per_unit;
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn whole_months(&self) -> u64 {
        self.elapsed.floor() as u64
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_dt_into_months() {
        let mut clock = SimulationClock::default();
        for _ in 0..30 {
            clock.advance(1.0 / 30.0);
        }
        assert!((clock.elapsed() - 4.0).abs() < 1e-9);
        assert!(clock.whole_months() == 3 || clock.whole_months() == 4);

        clock.advance(0.1);
        assert_eq!(clock.whole_months(), 4);
    }

    #[test]
    fn never_runs_backwards() {
        let mut clock = SimulationClock::new(2.0);
        clock.advance(1.0);
        clock.advance(-5.0);
        clock.advance(f64::NAN);
        assert_eq!(clock.elapsed(), 2.0);
    }

    #[test]
    fn reset_zeroes_elapsed() {
        let mut clock = SimulationClock::default();
        clock.advance(3.3);
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.whole_months(), 0);
    }
}
