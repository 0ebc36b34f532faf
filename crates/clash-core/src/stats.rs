//! Per-kind stat tables for troops, cards, and towers.
//!
//! A single generic tick function consults these tables instead of
//! dispatching on a type per unit.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{AttackStyle, CardKind, TowerKind, TroopKind};

/// Base stats for a troop kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TroopStats {
    /// Movement speed (units/s).
    pub speed: f64,
    pub health: f64,
    pub damage: f64,
    /// Attack timer progress per second; one attack per `1 / attack_speed` s.
    pub attack_speed: f64,
    /// Wind-up progress per second before the first strike on a new target.
    pub initial_attack_speed: f64,
    /// Steering mass. Heavier troops push lighter ones aside.
    pub weight: f64,
    pub air: bool,
    pub can_hit_air: bool,
    /// Ignores troops and walks to the nearest building.
    pub target_buildings: bool,
    pub attack_radius: f64,
    pub attack: AttackStyle,
}

/// Get the stat table entry for a troop kind.
pub fn troop_stats(kind: TroopKind) -> TroopStats {
    match kind {
        TroopKind::Giant => TroopStats {
            speed: 10.0,
            health: 4090.0,
            damage: 253.0,
            attack_speed: 1.0 / 1.5,
            initial_attack_speed: 2.0,
            weight: 18.0,
            air: false,
            can_hit_air: false,
            target_buildings: true,
            attack_radius: DEFAULT_ATTACK_RADIUS,
            attack: AttackStyle::Melee,
        },
        TroopKind::Skeleton => TroopStats {
            speed: 25.0,
            health: 81.0,
            damage: 81.0,
            attack_speed: 1.0,
            initial_attack_speed: 2.0,
            weight: 1.0,
            air: false,
            can_hit_air: false,
            target_buildings: false,
            attack_radius: DEFAULT_ATTACK_RADIUS,
            attack: AttackStyle::Melee,
        },
        TroopKind::Knight => TroopStats {
            speed: 15.0,
            health: 1766.0,
            damage: 202.0,
            attack_speed: 1.0 / 1.2,
            initial_attack_speed: 2.5,
            weight: 6.0,
            air: false,
            can_hit_air: false,
            target_buildings: false,
            attack_radius: DEFAULT_ATTACK_RADIUS,
            attack: AttackStyle::Melee,
        },
        TroopKind::MiniPekka => TroopStats {
            speed: 25.0,
            health: 1361.0,
            damage: 720.0,
            attack_speed: 1.0 / 1.6,
            initial_attack_speed: 2.0,
            weight: 4.0,
            air: false,
            can_hit_air: false,
            target_buildings: false,
            attack_radius: DEFAULT_ATTACK_RADIUS,
            attack: AttackStyle::Melee,
        },
        TroopKind::BabyDragon => TroopStats {
            speed: 25.0,
            health: 1152.0,
            damage: 161.0,
            attack_speed: 1.0 / 1.5,
            initial_attack_speed: 2.0,
            weight: 5.0,
            air: true,
            can_hit_air: true,
            target_buildings: false,
            attack_radius: 90.0,
            attack: AttackStyle::Splash {
                speed: 200.0,
                radius: 30.0,
            },
        },
        TroopKind::Musketeer => TroopStats {
            speed: 15.0,
            health: 720.0,
            damage: 218.0,
            attack_speed: 1.0,
            initial_attack_speed: 2.0,
            weight: 4.0,
            air: false,
            can_hit_air: true,
            target_buildings: false,
            attack_radius: 120.0,
            attack: AttackStyle::Projectile { speed: 300.0 },
        },
    }
}

/// What playing a card puts on the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CardEffect {
    /// Spawn `count` troops of `kind` around the chosen point.
    Troops { kind: TroopKind, count: u32 },
    /// Launch an area projectile from the caster's king tower.
    Spell { damage: f64, radius: f64, speed: f64 },
}

/// Static definition of a card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardDef {
    pub name: &'static str,
    /// Elixir cost.
    pub cost: f64,
    pub effect: CardEffect,
}

/// Get the definition of a card kind.
pub fn card_def(kind: CardKind) -> CardDef {
    let troops = |kind, count| CardEffect::Troops { kind, count };
    match kind {
        CardKind::Knight => CardDef {
            name: "KNIGHT",
            cost: 3.0,
            effect: troops(TroopKind::Knight, 1),
        },
        CardKind::Giant => CardDef {
            name: "GIANT",
            cost: 5.0,
            effect: troops(TroopKind::Giant, 1),
        },
        CardKind::MiniPekka => CardDef {
            name: "MINI_PEKKA",
            cost: 4.0,
            effect: troops(TroopKind::MiniPekka, 1),
        },
        CardKind::BabyDragon => CardDef {
            name: "BABY_DRAGON",
            cost: 4.0,
            effect: troops(TroopKind::BabyDragon, 1),
        },
        CardKind::Fireball => CardDef {
            name: "FIREBALL",
            cost: 4.0,
            effect: CardEffect::Spell {
                damage: FIREBALL_DAMAGE,
                radius: FIREBALL_RADIUS,
                speed: FIREBALL_SPEED,
            },
        },
        CardKind::Skeletons => CardDef {
            name: "SKELETON",
            cost: 1.0,
            effect: troops(TroopKind::Skeleton, 3),
        },
        CardKind::SkeletonArmy => CardDef {
            name: "SKARMY",
            cost: 3.0,
            effect: troops(TroopKind::Skeleton, 15),
        },
        CardKind::Musketeer => CardDef {
            name: "MUSKETEER",
            cost: 4.0,
            effect: troops(TroopKind::Musketeer, 1),
        },
    }
}

/// The deck both sides use unless configured otherwise.
pub const DEFAULT_DECK: [CardKind; DECK_SIZE] = [
    CardKind::Knight,
    CardKind::Giant,
    CardKind::MiniPekka,
    CardKind::BabyDragon,
    CardKind::Fireball,
    CardKind::Skeletons,
    CardKind::SkeletonArmy,
];

/// Base stats for a tower kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub health: f64,
    pub damage: f64,
    pub range: f64,
    /// Fire timer progress per second.
    pub fire_rate: f64,
    pub starts_active: bool,
}

pub fn tower_stats(kind: TowerKind) -> TowerStats {
    match kind {
        TowerKind::Princess => TowerStats {
            health: PRINCESS_TOWER_HEALTH,
            damage: PRINCESS_TOWER_DAMAGE,
            range: PRINCESS_TOWER_RANGE,
            fire_rate: PRINCESS_TOWER_FIRE_RATE,
            starts_active: true,
        },
        TowerKind::King => TowerStats {
            health: KING_TOWER_HEALTH,
            damage: KING_TOWER_DAMAGE,
            range: KING_TOWER_RANGE,
            fire_rate: KING_TOWER_FIRE_RATE,
            starts_active: false,
        },
    }
}
