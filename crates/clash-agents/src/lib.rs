//! Deployment policies for CLASH.
//!
//! An agent sees only its own elixir and deck through a [`Deployer`] and may
//! ask it to place a card. Agents never touch entity state directly.

pub mod policies;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use clash_core::enums::{CardKind, Side};

pub use clash_core as core;
pub use policies::{IdleAgent, LaneAgent, OneShotAgent, RandomAgent};

/// The slice of a player an agent is allowed to see and act through.
pub trait Deployer {
    fn side(&self) -> Side;

    /// Current elixir, in [0, 10].
    fn elixir(&self) -> f64;

    /// The full deck in slot order; the first four slots are the hand.
    fn deck(&self) -> Vec<CardKind>;

    /// Elixir cost of the card in a hand slot, if the slot exists.
    fn cost_of(&self, hand_index: usize) -> Option<f64>;

    /// Play the card in `hand_index` at (x, y). Returns false when the
    /// placement was rejected (bad slot, not enough elixir, ...).
    fn place_card(&mut self, x: f64, y: f64, hand_index: usize) -> bool;
}

/// A player policy, called once per tick during the deployment step.
pub trait Agent: Send {
    fn name(&self) -> &'static str;

    fn tick(&mut self, dt: f64, deployer: &mut dyn Deployer);
}

/// Selectable agent implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Random slot, random position on its own half.
    #[default]
    Random,
    /// Keeps pushing hand slot 2 down the left lane.
    Lane,
    /// Plays hand slot 0 once, then idles.
    OneShot,
    Idle,
}

impl AgentKind {
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Random,
        AgentKind::Lane,
        AgentKind::OneShot,
        AgentKind::Idle,
    ];
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Random => "random",
            AgentKind::Lane => "lane",
            AgentKind::OneShot => "one_shot",
            AgentKind::Idle => "idle",
        };
        f.write_str(name)
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s.to_ascii_lowercase().replace('-', "_"))
            .ok_or_else(|| format!("unknown agent '{s}' (expected random, lane, one_shot, idle)"))
    }
}

/// Build an agent. `seed` only matters for randomized agents.
pub fn build(kind: AgentKind, seed: u64) -> Box<dyn Agent> {
    match kind {
        AgentKind::Random => Box::new(RandomAgent::new(seed)),
        AgentKind::Lane => Box::new(LaneAgent::default()),
        AgentKind::OneShot => Box::new(OneShotAgent::default()),
        AgentKind::Idle => Box::new(IdleAgent),
    }
}
