//! Fixed-grid runs of the classic and carrying-capacity models, printed as CSV.
//!
//! Run with: `cargo run --bin lv-analysis -- --experiment classic`

use std::error::Error;
use std::io::{self, Write};

use clap::{Parser, ValueEnum};

use lotka_volterra::analysis::{Experiment, solve};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Which {
    /// Classic model without carrying capacity
    Classic,
    /// Rabbits and foxes with a carrying capacity
    Capacity,
    /// Both experiments, one after the other
    All,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Lotka-Volterra fixed-grid experiments as CSV")]
struct Cli {
    /// Experiment to solve
    #[arg(long, value_enum, default_value_t = Which::All)]
    experiment: Which,
}

impl Which {
    fn experiments(self) -> Vec<Experiment> {
        match self {
            Which::Classic => vec![Experiment::classic()],
            Which::Capacity => vec![Experiment::rabbits_and_foxes()],
            Which::All => Experiment::presets().into(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for experiment in cli.experiment.experiments() {
        let trajectory = solve(&experiment)?;
        if let Some(peaks) = trajectory.peaks() {
            log::info!(
                "{}: prey in [{:.1}, {:.1}], predator in [{:.1}, {:.1}]",
                experiment.name,
                peaks.prey_min,
                peaks.prey_max,
                peaks.predator_min,
                peaks.predator_max
            );
        }
        writeln!(out, "# {}", experiment.name)?;
        trajectory.write_csv(&mut out)?;
    }
    Ok(())
}
