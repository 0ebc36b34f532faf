//! Events emitted by the simulation during a tick.
//!
//! Collected per tick and handed to observers inside the snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A card was played successfully.
    CardPlayed {
        side: Side,
        card: CardKind,
        position: Position,
    },
    TroopSpawned {
        id: u64,
        kind: TroopKind,
        side: Side,
    },
    TroopDied {
        id: u64,
        kind: TroopKind,
        side: Side,
    },
    /// A tower or ranged troop launched a projectile.
    ProjectileFired { id: u64, side: Side },
    /// An area projectile detonated.
    AreaImpact {
        side: Side,
        position: Position,
        radius: f64,
        hits: u32,
    },
    TowerDestroyed {
        id: u64,
        kind: TowerKind,
        side: Side,
    },
    /// A king tower woke up after its princess towers fell.
    KingActivated { side: Side },
    MatchOver { winner: Side },
}
