//! Card placement errors and the agent-facing view of a player.

use thiserror::Error;

use clash_agents::Deployer;
use clash_core::enums::{CardKind, Side};

use crate::engine::Game;

/// Why a card could not be played.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("hand slot {0} does not hold a playable card")]
    InvalidHandIndex(usize),

    #[error("card costs {cost} elixir but only {available:.2} is available")]
    InsufficientElixir { cost: f64, available: f64 },

    #[error("no live king tower to launch the spell from")]
    NoLaunchTower,

    #[error("the match is no longer running")]
    MatchOver,
}

/// One side of a running game, as handed to that side's agent.
pub struct Seat<'a> {
    pub(crate) game: &'a mut Game,
    pub(crate) side: Side,
}

impl Deployer for Seat<'_> {
    fn side(&self) -> Side {
        self.side
    }

    fn elixir(&self) -> f64 {
        self.game.player(self.side).elixir
    }

    fn deck(&self) -> Vec<CardKind> {
        self.game.player(self.side).deck.kinds()
    }

    fn cost_of(&self, hand_index: usize) -> Option<f64> {
        self.game
            .player(self.side)
            .deck
            .hand_card(hand_index)
            .map(|card| card.cost())
    }

    fn place_card(&mut self, x: f64, y: f64, hand_index: usize) -> bool {
        self.game.place_card(self.side, x, y, hand_index)
    }
}
