//! Keyboard-edited parameter form. Produces validated, immutable
//! [`SimulationConfig`] snapshots for the driving loop.

use crate::config::SimulationConfig;
use crate::error::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    R1,
    A1,
    R2,
    A2,
    CarryingCapacity,
    InitialPrey,
    InitialPredator,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::R1,
        Field::A1,
        Field::R2,
        Field::A2,
        Field::CarryingCapacity,
        Field::InitialPrey,
        Field::InitialPredator,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::R1 => "Rabbit growth (r1)",
            Field::A1 => "Rabbits hunted by foxes (a1)",
            Field::R2 => "Fox mortality (r2)",
            Field::A2 => "Rabbits converted to foxes (a2)",
            Field::CarryingCapacity => "Carrying capacity (K)",
            Field::InitialPrey => "Initial rabbits",
            Field::InitialPredator => "Initial foxes",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Field::R1 => "r1",
            Field::A1 => "a1",
            Field::R2 => "r2",
            Field::A2 => "a2",
            Field::CarryingCapacity => "K",
            Field::InitialPrey => "initial prey",
            Field::InitialPredator => "initial predator",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParameterForm {
    values: [String; 7],
    focus: usize,
    base: SimulationConfig,
    error: Option<FormError>,
}

impl ParameterForm {
    pub fn new(config: &SimulationConfig) -> Self {
        let mut form = Self {
            values: Default::default(),
            focus: 0,
            base: config.clone(),
            error: None,
        };
        form.load(config);
        form
    }

    /// Refill every field from `config`.
    pub fn load(&mut self, config: &SimulationConfig) {
        let p = &config.params;
        let numbers = [
            p.r1,
            p.a1,
            p.r2,
            p.a2,
            p.carrying_capacity,
            config.initial.prey,
            config.initial.predator,
        ];
        for (slot, value) in self.values.iter_mut().zip(numbers) {
            *slot = value.to_string();
        }
        self.base = config.clone();
        self.error = None;
    }

    pub fn focused(&self) -> Field {
        Field::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
    }

    /// Append typed text to the focused field, keeping only characters that
    /// can appear in a float literal.
    pub fn insert_text(&mut self, text: &str) {
        let accepted = text
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
        self.values[self.focus].extend(accepted);
    }

    pub fn backspace(&mut self) {
        self.values[self.focus].pop();
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field as usize]
    }

    pub fn entries(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.iter().map(|&f| (f, self.value(f)))
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// Parse and validate all fields. On failure the error is also kept for
    /// display until the next successful submit or reload.
    pub fn submit(&mut self) -> Result<SimulationConfig, FormError> {
        let result = self.parse();
        match &result {
            Ok(_) => self.error = None,
            Err(err) => {
                log::warn!("Parameter form rejected: {err}");
                self.error = Some(err.clone());
            }
        }
        result
    }

    fn parse(&self) -> Result<SimulationConfig, FormError> {
        let mut numbers = [0.0; 7];
        for (slot, field) in numbers.iter_mut().zip(Field::ALL) {
            let text = self.value(field).trim();
            *slot = text.parse::<f64>().map_err(|_| FormError::InvalidNumber {
                field: field.key(),
                text: text.to_string(),
            })?;
        }
        let [r1, a1, r2, a2, carrying_capacity, prey, predator] = numbers;

        let mut config = self.base.clone();
        config.params.r1 = r1;
        config.params.a1 = a1;
        config.params.r2 = r2;
        config.params.a2 = a2;
        config.params.carrying_capacity = carrying_capacity;
        config.initial.prey = prey;
        config.initial.predator = predator;
        config.validate()?;
        Ok(config)
    }
}
