//! Troop pass: targeting, then either steering toward the target or attacking it.

use hecs::{Entity, World};

use clash_core::components::{Owner, Troop};
use clash_core::enums::{AttackStyle, Side, TroopState};
use clash_core::events::GameEvent;
use clash_core::types::Position;

use super::combat::{self, is_live};
use super::steering::{self, Body};
use super::targeting::{self, Scanner};
use crate::roster::{entity_id, Rosters};
use crate::world_setup::{spawn_area_projectile, spawn_projectile};

/// Update every live troop in spawn order.
pub fn run(world: &mut World, rosters: &mut Rosters, dt: f64, events: &mut Vec<GameEvent>) {
    // Projectiles spawned below push onto the roster, so walk a copy.
    let order = rosters.troops.clone();

    for entity in order {
        if is_live(world, entity) {
            update(world, rosters, entity, dt, events);
        }
    }
}

fn update(
    world: &mut World,
    rosters: &mut Rosters,
    entity: Entity,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    let Ok(mut troop) = world.get::<&Troop>(entity).map(|t| *t) else {
        return;
    };
    let Ok(mut position) = world.get::<&Position>(entity).map(|p| *p) else {
        return;
    };
    let Ok(side) = world.get::<&Owner>(entity).map(|o| o.0) else {
        return;
    };

    let target = acquire(world, rosters, &troop, side, position);
    if target != troop.target {
        troop.initial_attack_timer = 0.0;
    }
    troop.target = target;

    troop.attack_timer = (troop.attack_timer + troop.attack_speed * dt).min(1.0);

    let target_pos = target.and_then(|t| world.get::<&Position>(t).ok().map(|p| *p));
    let mut strike = None;

    troop.state = match target.zip(target_pos) {
        Some((target, target_pos)) => {
            troop.direction_deg = position.heading_deg_to(&target_pos);

            if position.within(&target_pos, troop.attack_radius) {
                troop.initial_attack_timer =
                    (troop.initial_attack_timer + troop.initial_attack_speed * dt).min(1.0);
                if troop.attack_timer >= 1.0 && troop.initial_attack_timer >= 1.0 {
                    troop.attack_timer = 0.0;
                    strike = Some((target, target_pos));
                }
                TroopState::Attacking
            } else {
                TroopState::Approaching
            }
        }
        None => TroopState::Seeking,
    };

    if troop.state != TroopState::Attacking {
        let me = Body {
            entity,
            position: position.as_vec(),
            weight: troop.weight,
        };
        let others = steering::bodies(world, &rosters.troops);
        let velocity = steering::desired_velocity(troop.direction_deg, troop.speed)
            + steering::separation(&me, &others);
        position = Position::from_vec(me.position + velocity * dt);
    }

    if let Ok(mut stored) = world.get::<&mut Troop>(entity) {
        *stored = troop;
    }
    if let Ok(mut stored) = world.get::<&mut Position>(entity) {
        *stored = position;
    }

    if let Some((target, target_pos)) = strike {
        attack(world, rosters, entity, side, position, &troop, target, target_pos, events);
    }
}

/// Keep a live target, otherwise scan for a new one.
fn acquire(
    world: &World,
    rosters: &Rosters,
    troop: &Troop,
    side: Side,
    position: Position,
) -> Option<Entity> {
    if let Some(target) = targeting::revalidate(troop.target, |e| is_live(world, e)) {
        return Some(target);
    }

    let scanner = Scanner {
        side,
        position,
        can_hit_air: troop.can_hit_air,
        target_buildings: troop.target_buildings,
    };
    let troops = targeting::candidates(world, &rosters.troops);
    let towers = targeting::candidates(world, &rosters.towers);
    targeting::select_target(&scanner, &troops, &towers)
}

#[allow(clippy::too_many_arguments)]
fn attack(
    world: &mut World,
    rosters: &mut Rosters,
    entity: Entity,
    side: Side,
    position: Position,
    troop: &Troop,
    target: Entity,
    target_pos: Position,
    events: &mut Vec<GameEvent>,
) {
    match troop.attack {
        AttackStyle::Melee => {
            combat::apply_damage(world, &rosters.towers, target, troop.damage, events);
        }
        AttackStyle::Projectile { speed } => {
            let shot = spawn_projectile(
                world,
                rosters,
                position,
                side,
                Some(entity),
                target,
                target_pos,
                troop.damage,
                speed,
            );
            events.push(GameEvent::ProjectileFired {
                id: entity_id(shot),
                side,
            });
        }
        AttackStyle::Splash { speed, radius } => {
            let shot = spawn_area_projectile(
                world,
                rosters,
                position,
                side,
                Some(entity),
                target_pos,
                troop.damage,
                speed,
                radius,
            );
            events.push(GameEvent::ProjectileFired {
                id: entity_id(shot),
                side,
            });
        }
    }
}
