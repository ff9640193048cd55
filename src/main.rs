use std::error::Error;
use std::path::Path;

use piston_window::*;

use lotka_volterra::config::SimulationConfig;
use lotka_volterra::form::ParameterForm;
use lotka_volterra::session::{RunState, Signal, Simulation};

mod render;

use render::{Renderer, WINDOW_HEIGHT, WINDOW_WIDTH};

const CONFIG_PATHS: [&str; 2] = ["lotka.yaml", "config/lotka.yaml"];
const ASSETS_DIR: &str = "assets";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    match config.to_yaml() {
        Ok(text) => log::debug!("Effective config:\n{text}"),
        Err(err) => log::warn!("Could not render config: {err}"),
    }
    let mut simulation = Simulation::new(config.clone())?;
    let mut form = ParameterForm::new(&config);

    let mut window: PistonWindow = WindowSettings::new(
        "Lotka-Volterra Predator-Prey Model",
        [WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32],
    )
    .exit_on_esc(true)
    .build()?;
    window.set_ups(config.updates_per_second);
    window.set_max_fps(config.updates_per_second);

    let mut renderer = Renderer::load(&mut window, Path::new(ASSETS_DIR));

    while let Some(e) = window.next() {
        if let Some(Button::Keyboard(key)) = e.press_args() {
            handle_key(key, &mut simulation, &mut form);
        }

        if let Some(text) = e.text_args() {
            if simulation.state() == RunState::Idle {
                form.insert_text(&text);
            }
        }

        if let Some(args) = e.update_args() {
            simulation.tick(args.dt);
        }

        window.draw_2d(&e, |c, g, device| {
            renderer.draw(&simulation, &form, c, g);
            if let Some(glyphs) = renderer.glyphs_mut() {
                glyphs.factory.encoder.flush(device);
            }
        });
    }

    log::info!(
        "Window closed after {} ticks, {} months",
        simulation.history().len(),
        simulation.clock().whole_months()
    );
    Ok(())
}

fn handle_key(key: Key, simulation: &mut Simulation, form: &mut ParameterForm) {
    let idle = simulation.state() == RunState::Idle;
    match key {
        Key::Return if idle => {
            // Rejections stay on the form for display.
            if let Ok(config) = form.submit() {
                match simulation.configure(config) {
                    Ok(()) => {
                        simulation.handle(Signal::Start);
                    }
                    Err(err) => log::warn!("Could not apply parameters: {err}"),
                }
            }
        }
        Key::Space => {
            simulation.handle(Signal::Stop);
        }
        Key::F5 => {
            simulation.handle(Signal::Reset);
            form.load(simulation.config());
        }
        Key::Up if idle => form.focus_previous(),
        Key::Down | Key::Tab if idle => form.focus_next(),
        Key::Backspace if idle => form.backspace(),
        _ => {}
    }
}

/// Load configuration from file or use default
fn load_config() -> SimulationConfig {
    for path in CONFIG_PATHS {
        if !Path::new(path).exists() {
            continue;
        }
        match SimulationConfig::from_file(path) {
            Ok(config) => {
                log::info!("Loaded config from: {}", path);
                return config;
            }
            Err(err) => log::warn!("Ignoring config {}: {}", path, err),
        }
    }

    log::info!("Using default configuration");
    SimulationConfig::default()
}
