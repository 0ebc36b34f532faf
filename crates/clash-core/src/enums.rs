//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// The two opposing players. Blue is the focused side and sits at the
/// bottom of the arena; Red sits at the top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Blue,
    Red,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Blue, Side::Red];

    /// Slot of this side in per-player arrays.
    pub fn index(self) -> usize {
        match self {
            Side::Blue => 0,
            Side::Red => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    /// Whether this side is drawn at the bottom of the board.
    pub fn is_focused(self) -> bool {
        self == Side::Blue
    }

    /// Initial facing of freshly spawned troops, in degrees.
    pub fn advance_heading_deg(self) -> f64 {
        if self.is_focused() {
            90.0
        } else {
            270.0
        }
    }
}

/// Troop unit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TroopKind {
    Giant,
    Skeleton,
    Knight,
    MiniPekka,
    BabyDragon,
    Musketeer,
}

/// Deployable card types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Knight,
    Giant,
    MiniPekka,
    BabyDragon,
    Fireball,
    Skeletons,
    SkeletonArmy,
    Musketeer,
}

/// Defensive structure types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Side tower, active from the start.
    Princess,
    /// Rear tower, dormant until both princess towers fall.
    King,
}

/// How a troop delivers its attack once in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttackStyle {
    /// Damage applied directly to the target.
    Melee,
    /// Fires a straight projectile at the target.
    Projectile { speed: f64 },
    /// Lobs an area projectile at the target's current position.
    Splash { speed: f64, radius: f64 },
}

/// Troop behavior state, derived each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TroopState {
    /// No target held.
    #[default]
    Seeking,
    /// Target held, outside attack radius.
    Approaching,
    /// Target held, within attack radius.
    Attacking,
    Dead,
}
