//! Cleanup system: removes dead troops and spent projectiles.

use hecs::{Entity, World};

use clash_core::components::Health;

use crate::roster::Rosters;

/// Drop dead troops and everything queued in `despawn_buffer` from the world
/// and the rosters. Towers stay in their roster for the whole match.
pub fn run(world: &mut World, rosters: &mut Rosters, despawn_buffer: &mut Vec<Entity>) {
    for &entity in &rosters.troops {
        let dead = world.get::<&Health>(entity).map(|h| h.dead).unwrap_or(true);
        if dead {
            despawn_buffer.push(entity);
        }
    }

    if despawn_buffer.is_empty() {
        return;
    }

    rosters.troops.retain(|e| !despawn_buffer.contains(e));
    rosters.projectiles.retain(|e| !despawn_buffer.contains(e));

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
