use std::path::Path;

use piston_window::*;
use rand::Rng;
use rand::rngs::ThreadRng;

use lotka_volterra::form::ParameterForm;
use lotka_volterra::history::TimeSeriesRecorder;
use lotka_volterra::session::{RunState, Simulation};

pub const WINDOW_WIDTH: f64 = 1400.0;
pub const WINDOW_HEIGHT: f64 = 600.0;
const FIELD_WIDTH: f64 = WINDOW_WIDTH * 0.6;
const RABBIT_SIZE: f64 = 30.0;
const FOX_SIZE: f64 = 40.0;
const MAX_SPRITES: usize = 1500; // per species
const CHART_ORIGIN: [f64; 2] = [870.0, 20.0];
const CHART_SIZE: [f64; 2] = [500.0, 400.0];

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const GRAY: [f32; 4] = [0.78, 0.78, 0.78, 1.0];
const LIGHT_GRAY: [f32; 4] = [0.93, 0.93, 0.93, 1.0];
const PREY_COLOR: [f32; 4] = [0.12, 0.47, 0.71, 1.0];
const PREDATOR_COLOR: [f32; 4] = [0.84, 0.15, 0.16, 1.0];
const FOCUS_COLOR: [f32; 4] = [1.0, 0.95, 0.7, 1.0];

const FONT_FILE: &str = "FiraSans-Regular.ttf";
const RABBIT_FILE: &str = "rabbit.png";
const FOX_FILE: &str = "fox.png";

struct Sprite {
    texture: Option<G2dTexture>,
    size: f64,
    color: [f32; 4],
}

impl Sprite {
    fn load(context: &mut G2dTextureContext, path: &Path, size: f64, color: [f32; 4]) -> Self {
        let texture = match Texture::from_path(context, path, Flip::None, &TextureSettings::new()) {
            Ok(texture) => Some(texture),
            Err(err) => {
                log::warn!("Could not load sprite {:?}, drawing squares: {}", path, err);
                None
            }
        };
        Sprite {
            texture,
            size,
            color,
        }
    }

    fn draw(&self, [x, y]: [f64; 2], transform: math::Matrix2d, g: &mut G2d) {
        match &self.texture {
            Some(texture) => {
                let (w, h) = texture.get_size();
                let transform = transform
                    .trans(x, y)
                    .scale(self.size / w.max(1) as f64, self.size / h.max(1) as f64);
                image(texture, transform, g);
            }
            None => rectangle(self.color, [x, y, self.size, self.size], transform, g),
        }
    }
}

/// Draws the sprite field, population counts, chart and form.
pub struct Renderer {
    glyphs: Option<Glyphs>,
    rabbit: Sprite,
    fox: Sprite,
    rabbit_positions: Vec<[f64; 2]>,
    fox_positions: Vec<[f64; 2]>,
    rng: ThreadRng,
}

impl Renderer {
    pub fn load(window: &mut PistonWindow, assets: &Path) -> Self {
        let font_path = assets.join(FONT_FILE);
        let glyphs = match window.load_font(&font_path) {
            Ok(glyphs) => Some(glyphs),
            Err(err) => {
                log::warn!("Could not load font file at {:?}, text disabled: {}", font_path, err);
                None
            }
        };

        let mut texture_context = window.create_texture_context();
        let rabbit_path = assets.join(RABBIT_FILE);
        let fox_path = assets.join(FOX_FILE);
        let rabbit = Sprite::load(&mut texture_context, &rabbit_path, RABBIT_SIZE, PREY_COLOR);
        let fox = Sprite::load(&mut texture_context, &fox_path, FOX_SIZE, PREDATOR_COLOR);

        Renderer {
            glyphs,
            rabbit,
            fox,
            rabbit_positions: Vec::new(),
            fox_positions: Vec::new(),
            rng: rand::rng(),
        }
    }

    pub fn glyphs_mut(&mut self) -> Option<&mut Glyphs> {
        self.glyphs.as_mut()
    }

    pub fn draw(&mut self, sim: &Simulation, form: &ParameterForm, c: Context, g: &mut G2d) {
        clear(WHITE, g);

        match sim.state() {
            RunState::Idle => self.draw_form(form, &c, g),
            state => {
                // Stopped keeps the last scatter on screen.
                if state == RunState::Running {
                    self.scatter(sim.model().prey(), sim.model().predator());
                }
                for &pos in &self.rabbit_positions {
                    self.rabbit.draw(pos, c.transform, g);
                }
                for &pos in &self.fox_positions {
                    self.fox.draw(pos, c.transform, g);
                }
                self.draw_chart(sim.history(), &c, g);
                self.draw_counts(sim, &c, g);
            }
        }
        self.draw_status(sim, &c, g);
    }

    fn scatter(&mut self, prey: f64, predator: f64) {
        let rng = &mut self.rng;
        let mut place = |count: f64, out: &mut Vec<[f64; 2]>| {
            let count = (count.max(0.0) as usize).min(MAX_SPRITES);
            out.clear();
            out.extend((0..count).map(|_| {
                [
                    rng.random_range(0.0..FIELD_WIDTH - RABBIT_SIZE),
                    rng.random_range(0.0..WINDOW_HEIGHT - RABBIT_SIZE),
                ]
            }));
        };
        place(prey, &mut self.rabbit_positions);
        place(predator, &mut self.fox_positions);
    }

    fn draw_counts(&mut self, sim: &Simulation, c: &Context, g: &mut G2d) {
        let (prey, predator) = sim.model().state();
        let history = sim.history();
        let p = sim.model().params();
        let rabbits = format!("Rabbits: {} (peak {})", prey as u64, history.max_prey() as u64);
        let foxes = format!("Foxes: {} (peak {})", predator as u64, history.max_predator() as u64);
        let months = format!("Months: {}", sim.clock().whole_months());
        let rates = format!(
            "r1 = {}  a1 = {}  r2 = {}  a2 = {}  K = {}",
            p.r1, p.a1, p.r2, p.a2, p.carrying_capacity
        );
        self.text(&rabbits, 22, [1130.0, 490.0], BLACK, c, g);
        self.text(&foxes, 22, [1130.0, 520.0], BLACK, c, g);
        self.text(&months, 22, [950.0, 520.0], BLACK, c, g);
        self.text(&rates, 16, [950.0, 560.0], BLACK, c, g);
    }

    fn draw_chart(&mut self, history: &TimeSeriesRecorder, c: &Context, g: &mut G2d) {
        let [x0, y0] = CHART_ORIGIN;
        let [w, h] = CHART_SIZE;
        rectangle(LIGHT_GRAY, [x0, y0, w, h], c.transform, g);
        line_from_to(BLACK, 1.0, [x0, y0 + h], [x0 + w, y0 + h], c.transform, g);
        line_from_to(BLACK, 1.0, [x0, y0], [x0, y0 + h], c.transform, g);

        let samples = history.snapshot();
        if samples.len() >= 2 {
            let top = history.peak().max(1.0) * 1.05;
            let stride = (samples.len() / w as usize).max(1);
            let last = samples.len() - 1;
            let to_screen = |i: usize, v: f64| {
                [x0 + w * i as f64 / last as f64, y0 + h - h * (v / top)]
            };

            let mut previous = 0;
            let mut i = stride.min(last);
            loop {
                let (a, b) = (samples[previous], samples[i]);
                let prey = [to_screen(previous, a.prey), to_screen(i, b.prey)];
                let predator = [to_screen(previous, a.predator), to_screen(i, b.predator)];
                line_from_to(PREY_COLOR, 1.0, prey[0], prey[1], c.transform, g);
                line_from_to(PREDATOR_COLOR, 1.0, predator[0], predator[1], c.transform, g);
                if i == last {
                    break;
                }
                previous = i;
                i = (i + stride).min(last);
            }

            self.text(&format!("{:.0}", top), 14, [x0 + 4.0, y0 + 14.0], BLACK, c, g);
        }

        let title = [x0 + 120.0, y0 + 18.0];
        self.text("Rabbit and fox populations", 18, title, BLACK, c, g);
        self.text("Ticks", 16, [x0 + w / 2.0 - 20.0, y0 + h + 22.0], BLACK, c, g);
        self.text("Rabbits", 16, [x0 + w - 90.0, y0 + 40.0], PREY_COLOR, c, g);
        self.text("Foxes", 16, [x0 + w - 90.0, y0 + 60.0], PREDATOR_COLOR, c, g);
    }

    fn draw_form(&mut self, form: &ParameterForm, c: &Context, g: &mut G2d) {
        let (x0, y0) = (60.0, 40.0);
        rectangle(LIGHT_GRAY, [x0, y0, 640.0, 520.0], c.transform, g);

        self.text("Model parameters", 24, [x0 + 20.0, y0 + 36.0], BLACK, c, g);
        let focused = form.focused();
        for (row, (field, value)) in form.entries().enumerate() {
            let y = y0 + 70.0 + row as f64 * 40.0;
            let background = if field == focused { FOCUS_COLOR } else { WHITE };
            rectangle(GRAY, [x0 + 379.0, y - 1.0, 222.0, 32.0], c.transform, g);
            rectangle(background, [x0 + 380.0, y, 220.0, 30.0], c.transform, g);
            self.text(field.label(), 18, [x0 + 20.0, y + 22.0], BLACK, c, g);
            self.text(value, 18, [x0 + 388.0, y + 22.0], BLACK, c, g);
        }

        let y = y0 + 70.0 + 7.0 * 40.0 + 20.0;
        let prey_equation = "dP/dt = r1 P (1 - P / K) - a1 P D";
        self.text(prey_equation, 18, [x0 + 20.0, y], BLACK, c, g);
        self.text("dD/dt = a2 P D - r2 D", 18, [x0 + 20.0, y + 26.0], BLACK, c, g);
        if let Some(err) = form.error() {
            let message = err.to_string();
            self.text(&message, 18, [x0 + 20.0, y + 64.0], PREDATOR_COLOR, c, g);
        }
    }

    fn text(
        &mut self,
        s: &str,
        size: u32,
        [x, y]: [f64; 2],
        color: [f32; 4],
        c: &Context,
        g: &mut G2d,
    ) {
        if let Some(glyphs) = self.glyphs.as_mut() {
            let transform = c.transform.trans(x, y);
            let drawn =
                text::Text::new_color(color, size).draw(s, glyphs, &c.draw_state, transform, g);
            if drawn.is_err() {
                log::debug!("Failed to draw text {:?}", s);
            }
        }
    }

    fn draw_status(&mut self, sim: &Simulation, c: &Context, g: &mut G2d) {
        let status = match sim.state() {
            RunState::Running if sim.model().is_extinct() => {
                "Both species extinct | Space: stop  F5: reset  Esc: quit"
            }
            RunState::Idle => "Idle | Up/Down: field  Return: start  Esc: quit",
            RunState::Running => "Running | Space: stop  F5: reset  Esc: quit",
            RunState::Stopped => "Stopped | F5: reset  Esc: quit",
        };
        self.text(status, 16, [10.0, WINDOW_HEIGHT - 10.0], BLACK, c, g);
    }
}
