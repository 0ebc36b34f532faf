//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use clash_core::components::*;
use clash_core::enums::Side;
use clash_core::events::GameEvent;
use clash_core::state::*;
use clash_core::types::{Position, SimTime};

use crate::player::Player;
use crate::roster::{entity_id, Rosters};

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    rosters: &Rosters,
    players: &[Player],
    time: SimTime,
    dt: f64,
    running: bool,
    winner: Option<Side>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time,
        dt,
        running,
        winner,
        players: players.iter().map(Player::view).collect(),
        troops: build_troops(world, rosters),
        towers: build_towers(world, rosters),
        projectiles: build_projectiles(world, rosters),
        events,
    }
}

/// Live troops sorted back to front by y. The sort is for drawing only;
/// the simulation always walks the roster in spawn order.
fn build_troops(world: &World, rosters: &Rosters) -> Vec<TroopView> {
    let mut troops: Vec<TroopView> = rosters
        .troops
        .iter()
        .filter_map(|&entity| {
            let troop = world.get::<&Troop>(entity).ok()?;
            let health = world.get::<&Health>(entity).ok()?;
            if health.dead {
                return None;
            }
            let position = *world.get::<&Position>(entity).ok()?;
            let side = world.get::<&Owner>(entity).ok()?.0;

            Some(TroopView {
                id: entity_id(entity),
                kind: troop.kind,
                side,
                position,
                direction: troop.direction_deg,
                health: health.current,
                max_health: health.max,
                state: troop.state,
                air: troop.air,
                target: troop.target.map(entity_id),
            })
        })
        .collect();

    troops.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));
    troops
}

fn build_towers(world: &World, rosters: &Rosters) -> Vec<TowerView> {
    rosters
        .towers
        .iter()
        .filter_map(|&entity| {
            let tower = world.get::<&Tower>(entity).ok()?;
            let health = world.get::<&Health>(entity).ok()?;
            let position = *world.get::<&Position>(entity).ok()?;
            let side = world.get::<&Owner>(entity).ok()?.0;

            Some(TowerView {
                id: entity_id(entity),
                kind: tower.kind,
                side,
                position,
                health: health.current,
                max_health: health.max,
                active: tower.active,
                dead: health.dead,
                target: tower.target.map(entity_id),
            })
        })
        .collect()
}

fn build_projectiles(world: &World, rosters: &Rosters) -> Vec<ProjectileView> {
    rosters
        .projectiles
        .iter()
        .filter_map(|&entity| {
            let projectile = world.get::<&Projectile>(entity).ok()?;
            let position = *world.get::<&Position>(entity).ok()?;
            let side = world.get::<&Owner>(entity).ok()?.0;

            let (target_pos, radius) = match projectile.flight {
                ProjectileFlight::Homing { .. } => (None, None),
                ProjectileFlight::Area { target_pos, radius } => (Some(target_pos), Some(radius)),
            };

            Some(ProjectileView {
                id: entity_id(entity),
                side,
                position,
                target_pos,
                radius,
            })
        })
        .collect()
}
