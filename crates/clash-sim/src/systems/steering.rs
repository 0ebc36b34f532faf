//! Crowd separation for moving troops.
//!
//! Each nearby troop contributes a push away from itself that fades to zero
//! at `MIN_SEPARATION`. The push is weighted by the other troop's share of
//! the pair's combined weight, so heavy units shove light ones aside.

use glam::DVec2;
use hecs::{Entity, World};

use clash_core::components::{Health, Troop};
use clash_core::constants::{MIN_SEPARATION, SEPARATION_STRENGTH};
use clash_core::types::{heading_vector, Position};

/// A troop as seen by the steering pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub entity: Entity,
    pub position: DVec2,
    pub weight: f64,
}

/// Live troops from the roster.
pub fn bodies(world: &World, roster: &[Entity]) -> Vec<Body> {
    roster
        .iter()
        .filter_map(|&entity| {
            if world.get::<&Health>(entity).ok()?.dead {
                return None;
            }
            let position = world.get::<&Position>(entity).ok()?.as_vec();
            let weight = world.get::<&Troop>(entity).ok()?.weight;
            Some(Body {
                entity,
                position,
                weight,
            })
        })
        .collect()
}

/// Velocity the troop wants from its facing and speed.
pub fn desired_velocity(direction_deg: f64, speed: f64) -> DVec2 {
    heading_vector(direction_deg) * speed
}

/// Separation velocity for `me` against every other body.
/// Coincident bodies have no defined push direction and are skipped.
pub fn separation(me: &Body, others: &[Body]) -> DVec2 {
    let mut push = DVec2::ZERO;

    for other in others {
        if other.entity == me.entity {
            continue;
        }

        let offset = me.position - other.position;
        let distance = offset.length();
        if distance <= f64::EPSILON || distance >= MIN_SEPARATION {
            continue;
        }

        let falloff = 1.0 - distance / MIN_SEPARATION;
        let total_weight = me.weight + other.weight;
        let share = if total_weight > 0.0 {
            other.weight / total_weight
        } else {
            0.5
        };

        push += (offset / distance) * falloff * share;
    }

    push * SEPARATION_STRENGTH
}
