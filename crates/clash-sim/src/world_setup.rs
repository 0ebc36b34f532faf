//! Entity spawn factories.
//!
//! Creates towers, troops and projectiles with the appropriate component
//! bundles and appends them to the matching roster.

use hecs::{Entity, World};

use clash_core::components::*;
use clash_core::constants::*;
use clash_core::enums::*;
use clash_core::stats::{tower_stats, troop_stats};
use clash_core::types::Position;

use crate::roster::Rosters;

/// Set up both sides' towers. Returns the king tower of each side,
/// indexed by `Side::index`.
pub fn setup_match(world: &mut World, rosters: &mut Rosters) -> [Entity; 2] {
    Side::ALL.map(|side| spawn_towers(world, rosters, side))
}

/// Spawn the three towers of one side. Returns the king tower.
pub fn spawn_towers(world: &mut World, rosters: &mut Rosters, side: Side) -> Entity {
    let place = |(x, y): (f64, f64)| {
        let pos = Position::new(x, y);
        if side.is_focused() {
            pos.mirrored()
        } else {
            pos
        }
    };

    for slot in PRINCESS_TOWER_POSITIONS {
        spawn_tower(world, rosters, TowerKind::Princess, side, place(slot));
    }
    spawn_tower(world, rosters, TowerKind::King, side, place(KING_TOWER_POSITION))
}

pub fn spawn_tower(
    world: &mut World,
    rosters: &mut Rosters,
    kind: TowerKind,
    side: Side,
    position: Position,
) -> Entity {
    let stats = tower_stats(kind);

    let tower = Tower {
        kind,
        damage: stats.damage,
        range: stats.range,
        fire_rate: stats.fire_rate,
        fire_timer: 0.0,
        target: None,
        active: stats.starts_active,
    };

    let entity = world.spawn((
        tower,
        position,
        Owner(side),
        Health {
            current: stats.health,
            max: stats.health,
            dead: false,
        },
    ));
    rosters.towers.push(entity);
    entity
}

/// Spawn a troop facing the enemy side, with stats from its kind's table.
pub fn spawn_troop(
    world: &mut World,
    rosters: &mut Rosters,
    position: Position,
    kind: TroopKind,
    side: Side,
) -> Entity {
    let stats = troop_stats(kind);

    let troop = Troop {
        kind,
        direction_deg: side.advance_heading_deg(),
        speed: stats.speed,
        damage: stats.damage,
        attack_speed: stats.attack_speed,
        attack_timer: 0.0,
        initial_attack_speed: stats.initial_attack_speed,
        initial_attack_timer: 0.0,
        weight: stats.weight,
        air: stats.air,
        can_hit_air: stats.can_hit_air,
        target_buildings: stats.target_buildings,
        attack_radius: stats.attack_radius,
        attack: stats.attack,
        target: None,
        state: TroopState::Seeking,
    };

    let entity = world.spawn((
        troop,
        position,
        Owner(side),
        Health {
            current: stats.health,
            max: stats.health,
            dead: false,
        },
    ));
    rosters.troops.push(entity);
    entity
}

/// Spawn a straight projectile aimed at `aim` (the target's position at launch).
#[allow(clippy::too_many_arguments)]
pub fn spawn_projectile(
    world: &mut World,
    rosters: &mut Rosters,
    origin: Position,
    side: Side,
    source: Option<Entity>,
    target: Entity,
    aim: Position,
    damage: f64,
    speed: f64,
) -> Entity {
    let projectile = Projectile {
        source,
        damage,
        speed,
        direction: (aim.as_vec() - origin.as_vec()).normalize_or_zero(),
        flight: ProjectileFlight::Homing { target },
    };

    let entity = world.spawn((projectile, origin, Owner(side)));
    rosters.projectiles.push(entity);
    entity
}

/// Spawn an area projectile that detonates at `target_pos`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_area_projectile(
    world: &mut World,
    rosters: &mut Rosters,
    origin: Position,
    side: Side,
    source: Option<Entity>,
    target_pos: Position,
    damage: f64,
    speed: f64,
    radius: f64,
) -> Entity {
    let projectile = Projectile {
        source,
        damage,
        speed,
        direction: (target_pos.as_vec() - origin.as_vec()).normalize_or_zero(),
        flight: ProjectileFlight::Area { target_pos, radius },
    };

    let entity = world.spawn((projectile, origin, Owner(side)));
    rosters.projectiles.push(entity);
    entity
}
