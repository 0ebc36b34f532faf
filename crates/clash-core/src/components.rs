//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components. Cross references
//! (targets, projectile sources) are `hecs::Entity` handles and must be
//! liveness-checked against the world before use.

use glam::DVec2;
use hecs::Entity;

use crate::enums::*;
use crate::types::Position;

/// The player an entity fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner(pub Side);

/// Hit points shared by troops and towers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    /// Always in [0, max].
    pub current: f64,
    pub max: f64,
    /// Set once when `current` reaches 0. A dead entity never acts again.
    pub dead: bool,
}

/// Mobile combat unit state. Stats are copied in from the kind's table at spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Troop {
    pub kind: TroopKind,
    /// Facing angle in degrees (90 = up the screen).
    pub direction_deg: f64,
    pub speed: f64,
    pub damage: f64,
    pub attack_speed: f64,
    /// Normalized progress toward the next attack, capped at 1.
    pub attack_timer: f64,
    pub initial_attack_speed: f64,
    /// Wind-up progress on the current target, capped at 1.
    pub initial_attack_timer: f64,
    pub weight: f64,
    pub air: bool,
    pub can_hit_air: bool,
    pub target_buildings: bool,
    pub attack_radius: f64,
    pub attack: AttackStyle,
    /// Troop or tower currently being pursued.
    pub target: Option<Entity>,
    pub state: TroopState,
}

/// Stationary turret.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tower {
    pub kind: TowerKind,
    pub damage: f64,
    pub range: f64,
    pub fire_rate: f64,
    /// Normalized progress toward the next shot, capped at 1.
    pub fire_timer: f64,
    /// Troop currently locked.
    pub target: Option<Entity>,
    /// Inactive towers do nothing. King towers start inactive.
    pub active: bool,
}

/// How a projectile decides it has arrived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileFlight {
    /// Flies straight and damages `target` when within the hit radius.
    Homing { target: Entity },
    /// Flies to a fixed point and damages everything within `radius` of it.
    Area { target_pos: Position, radius: f64 },
}

/// In-flight projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Entity that fired it, if any. Not required to still be alive.
    pub source: Option<Entity>,
    pub damage: f64,
    pub speed: f64,
    /// Unit vector, fixed at launch.
    pub direction: DVec2,
    pub flight: ProjectileFlight,
}

// Position is defined in types.rs and attached directly as a component.
