//! Tower pass: lock a troop in range and fire on a fixed cadence.

use hecs::World;

use clash_core::components::{Owner, Tower};
use clash_core::constants::TOWER_PROJECTILE_SPEED;
use clash_core::events::GameEvent;
use clash_core::types::Position;

use super::combat::is_live;
use super::targeting;
use crate::roster::{entity_id, Rosters};
use crate::world_setup::spawn_projectile;

pub fn run(world: &mut World, rosters: &mut Rosters, dt: f64, events: &mut Vec<GameEvent>) {
    let order = rosters.towers.clone();

    for entity in order {
        if !is_live(world, entity) {
            continue;
        }
        let Ok(mut tower) = world.get::<&Tower>(entity).map(|t| *t) else {
            continue;
        };
        if !tower.active {
            continue;
        }
        let Ok(position) = world.get::<&Position>(entity).map(|p| *p) else {
            continue;
        };
        let Ok(side) = world.get::<&Owner>(entity).map(|o| o.0) else {
            continue;
        };

        // A locked target is kept while it lives, even after it leaves range.
        tower.target = targeting::revalidate(tower.target, |e| is_live(world, e));
        if tower.target.is_none() {
            tower.target = rosters.troops.iter().copied().find(|&troop| {
                is_live(world, troop)
                    && world.get::<&Owner>(troop).map(|o| o.0 != side).unwrap_or(false)
                    && world
                        .get::<&Position>(troop)
                        .map(|p| position.within(&p, tower.range))
                        .unwrap_or(false)
            });
        }

        tower.fire_timer = (tower.fire_timer + tower.fire_rate * dt).min(1.0);

        let mut shot = None;
        if tower.fire_timer >= 1.0 {
            if let Some(target) = tower.target {
                if let Ok(aim) = world.get::<&Position>(target).map(|p| *p) {
                    tower.fire_timer = 0.0;
                    shot = Some((target, aim));
                }
            }
        }

        if let Ok(mut stored) = world.get::<&mut Tower>(entity) {
            *stored = tower;
        }

        if let Some((target, aim)) = shot {
            let projectile = spawn_projectile(
                world,
                rosters,
                position,
                side,
                Some(entity),
                target,
                aim,
                tower.damage,
                TOWER_PROJECTILE_SPEED,
            );
            events.push(GameEvent::ProjectileFired {
                id: entity_id(projectile),
                side,
            });
        }
    }
}
