use std::io::Write;

use lotka_volterra::{ConfigError, ConfigurationError, Signal, Simulation, SimulationConfig};

fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(text.as_bytes()).expect("write config");
    file
}

#[test]
fn loads_yaml_with_capacity_alias() {
    let file = write_config(
        r#"
params:
  r1: 0.8
  a1: 0.007
  r2: 0.2
  a2: 0.0004
  K: 1000
initial:
  prey: 250
  predator: 12
fixed_step: 0.01
"#,
    );
    let config = SimulationConfig::from_file(file.path()).unwrap();
    assert_eq!(config.params.carrying_capacity, 1000.0);
    assert_eq!(config.initial.prey, 250.0);
    assert_eq!(config.fixed_step, Some(0.01));
    assert_eq!(config.updates_per_second, 30);

    let mut sim = Simulation::new(config).unwrap();
    sim.handle(Signal::Start);
    assert_eq!(sim.tick(0.055), 5);
}

#[test]
fn infinite_capacity_is_accepted() {
    let file = write_config("params:\n  carrying_capacity: .inf\n");
    let config = SimulationConfig::from_file(file.path()).unwrap();
    assert!(config.params.carrying_capacity.is_infinite());
}

#[test]
fn degenerate_values_are_reported() {
    let file = write_config("initial:\n  prey: -5\n");
    let err = SimulationConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid(ConfigurationError::Negative { .. })
    ));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let file = write_config("params: [1, 2\n");
    assert!(matches!(
        SimulationConfig::from_file(file.path()),
        Err(ConfigError::Yaml(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("lotka.yaml");
    assert!(matches!(
        SimulationConfig::from_file(missing),
        Err(ConfigError::Io(_))
    ));
}
