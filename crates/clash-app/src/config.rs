//! Run configuration: TOML file first, then command-line overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use clash_agents::AgentKind;
use clash_core::constants::{DECK_SIZE, STARTING_ELIXIR, TICK_RATE};
use clash_core::enums::CardKind;
use clash_core::stats::DEFAULT_DECK;
use clash_sim::SimConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How the runner drives the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Fixed dt, as fast as possible, `iterations` matches back to back.
    #[default]
    Headless,
    /// Wall-clock dt on a loop thread paced to `tick_rate`.
    Realtime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub mode: Mode,
    /// Base seed. Match `i` of a headless run uses `seed + i`.
    pub seed: u64,
    /// Ticks per second.
    pub tick_rate: u32,
    /// Tick budget per match; a match still running after this is a draw.
    pub ticks: u64,
    pub iterations: u32,
    pub starting_elixir: f64,
    pub blue: AgentKind,
    pub red: AgentKind,
    pub blue_deck: Vec<CardKind>,
    pub red_deck: Vec<CardKind>,
    /// Print summaries as JSON instead of text.
    pub json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            seed: 42,
            tick_rate: TICK_RATE,
            ticks: u64::from(TICK_RATE) * 60 * 5,
            iterations: 1,
            starting_elixir: STARTING_ELIXIR,
            blue: AgentKind::Random,
            red: AgentKind::Random,
            blue_deck: DEFAULT_DECK.to_vec(),
            red_deck: DEFAULT_DECK.to_vec(),
            json: false,
        }
    }
}

impl RunConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".into()));
        }
        if self.iterations == 0 {
            return Err(ConfigError::Invalid("iterations must be at least 1".into()));
        }
        if self.ticks == 0 {
            return Err(ConfigError::Invalid("ticks must be at least 1".into()));
        }
        if !(0.0..=10.0).contains(&self.starting_elixir) {
            return Err(ConfigError::Invalid(format!(
                "starting_elixir {} is outside 0..=10",
                self.starting_elixir
            )));
        }
        deck_array("blue_deck", &self.blue_deck)?;
        deck_array("red_deck", &self.red_deck)?;
        Ok(())
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.tick_rate)
    }

    /// Engine config for one match.
    pub fn sim_config(&self, seed: u64) -> Result<SimConfig, ConfigError> {
        Ok(SimConfig {
            seed,
            starting_elixir: self.starting_elixir,
            blue_deck: deck_array("blue_deck", &self.blue_deck)?,
            red_deck: deck_array("red_deck", &self.red_deck)?,
        })
    }
}

fn deck_array(field: &str, deck: &[CardKind]) -> Result<[CardKind; DECK_SIZE], ConfigError> {
    deck.try_into().map_err(|_| {
        ConfigError::Invalid(format!(
            "{field} must list exactly {DECK_SIZE} cards, got {}",
            deck.len()
        ))
    })
}
