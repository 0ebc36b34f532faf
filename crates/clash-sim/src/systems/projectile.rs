//! Projectile pass: flight, impact, and area detonation.

use glam::DVec2;
use hecs::{Entity, World};

use clash_core::components::{Owner, Projectile, ProjectileFlight};
use clash_core::constants::*;
use clash_core::enums::Side;
use clash_core::events::GameEvent;
use clash_core::types::Position;

use super::combat::{self, is_live};
use crate::roster::Rosters;

/// Advance every projectile in spawn order. Spent projectiles are pushed onto
/// `despawn` and removed by cleanup.
pub fn run(
    world: &mut World,
    rosters: &Rosters,
    dt: f64,
    despawn: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) {
    for &entity in &rosters.projectiles {
        let Ok(projectile) = world.get::<&Projectile>(entity).map(|p| *p) else {
            continue;
        };
        let Ok(position) = world.get::<&Position>(entity).map(|p| *p) else {
            continue;
        };
        let Ok(side) = world.get::<&Owner>(entity).map(|o| o.0) else {
            continue;
        };

        let step = projectile.speed * dt;

        let next = match projectile.flight {
            ProjectileFlight::Homing { target } => {
                let target_pos = match world.get::<&Position>(target) {
                    Ok(pos) if is_live(world, target) => *pos,
                    _ => {
                        despawn.push(entity);
                        continue;
                    }
                };

                let next = Position::from_vec(position.as_vec() + projectile.direction * step);
                let closest = closest_on_segment(position.as_vec(), next.as_vec(), target_pos.as_vec());
                if Position::from_vec(closest).within(&target_pos, PROJECTILE_HIT_RADIUS) {
                    combat::apply_damage(world, &rosters.towers, target, projectile.damage, events);
                    despawn.push(entity);
                    continue;
                }
                next
            }
            ProjectileFlight::Area { target_pos, radius } => {
                // Land on the aim point rather than stepping past it.
                let next = if position.within(&target_pos, step) {
                    target_pos
                } else {
                    Position::from_vec(position.as_vec() + projectile.direction * step)
                };

                if next.within(&target_pos, AREA_ARRIVAL_EPSILON) {
                    detonate(world, rosters, side, target_pos, radius, projectile.damage, events);
                    despawn.push(entity);
                    continue;
                }
                next
            }
        };

        if out_of_bounds(&next) {
            despawn.push(entity);
            continue;
        }
        if let Ok(mut stored) = world.get::<&mut Position>(entity) {
            *stored = next;
        }
    }
}

/// Damage every live opposing troop and tower within `radius` of `center`,
/// each exactly once. Returns the number of entities hit.
pub fn detonate(
    world: &mut World,
    rosters: &Rosters,
    side: Side,
    center: Position,
    radius: f64,
    damage: f64,
    events: &mut Vec<GameEvent>,
) -> u32 {
    let victims: Vec<Entity> = rosters
        .troops
        .iter()
        .chain(rosters.towers.iter())
        .copied()
        .filter(|&e| {
            is_live(world, e)
                && world.get::<&Owner>(e).map(|o| o.0 != side).unwrap_or(false)
                && world
                    .get::<&Position>(e)
                    .map(|p| p.within(&center, radius))
                    .unwrap_or(false)
        })
        .collect();

    for &victim in &victims {
        combat::apply_damage(world, &rosters.towers, victim, damage, events);
    }

    let hits = victims.len() as u32;
    tracing::debug!(?side, x = center.x, y = center.y, radius, hits, "area impact");
    events.push(GameEvent::AreaImpact {
        side,
        position: center,
        radius,
        hits,
    });
    hits
}

/// Point on the segment `from..to` nearest to `point`.
fn closest_on_segment(from: DVec2, to: DVec2, point: DVec2) -> DVec2 {
    let segment = to - from;
    let len_sq = segment.length_squared();
    if len_sq == 0.0 {
        return from;
    }
    let t = ((point - from).dot(segment) / len_sq).clamp(0.0, 1.0);
    from + segment * t
}

fn out_of_bounds(pos: &Position) -> bool {
    pos.x < -OUT_OF_BOUNDS_MARGIN
        || pos.x > ARENA_WIDTH + OUT_OF_BOUNDS_MARGIN
        || pos.y < -OUT_OF_BOUNDS_MARGIN
        || pos.y > ARENA_HEIGHT + OUT_OF_BOUNDS_MARGIN
}
