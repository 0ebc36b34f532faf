//! Commands a host (input layer, scripted driver) can send to the simulation.
//!
//! Commands are queued and applied during the deployment step of the next tick.

use serde::{Deserialize, Serialize};

use crate::enums::Side;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Play the card in hand slot `hand_index` (0..4) at (x, y).
    PlaceCard {
        side: Side,
        x: f64,
        y: f64,
        hand_index: usize,
    },
    /// Stop the match at the next tick boundary.
    EndMatch,
}
