//! Game state snapshot: the read-only view handed to observers each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete game state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    /// Step used for the tick that produced this snapshot.
    pub dt: f64,
    pub running: bool,
    pub winner: Option<Side>,
    pub players: Vec<PlayerView>,
    /// Live troops, in draw order (back to front).
    pub troops: Vec<TroopView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    /// Everything that happened during this tick.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub side: Side,
    pub elixir: f64,
    /// Playable cards, in slot order.
    pub hand: Vec<CardKind>,
    /// Cards waiting to be drawn, next card first.
    pub queue: Vec<CardKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TroopView {
    pub id: u64,
    pub kind: TroopKind,
    pub side: Side,
    pub position: Position,
    /// Facing in degrees.
    pub direction: f64,
    pub health: f64,
    pub max_health: f64,
    pub state: TroopState,
    pub air: bool,
    pub target: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: u64,
    pub kind: TowerKind,
    pub side: Side,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub active: bool,
    pub dead: bool,
    pub target: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub side: Side,
    pub position: Position,
    /// Aim point for area projectiles.
    pub target_pos: Option<Position>,
    pub radius: Option<f64>,
}
