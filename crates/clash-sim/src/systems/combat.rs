//! Damage application, death, and the king tower trigger.

use hecs::{Entity, World};

use clash_core::components::{Health, Owner, Tower, Troop};
use clash_core::enums::{Side, TowerKind, TroopState};
use clash_core::events::GameEvent;

use crate::roster::entity_id;

/// Result of hitting an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Survived,
    Died,
    /// Target missing or already dead. Nothing happened.
    Ignored,
}

/// True if the entity exists and has not died.
pub fn is_live(world: &World, entity: Entity) -> bool {
    world
        .get::<&Health>(entity)
        .map(|health| !health.dead)
        .unwrap_or(false)
}

/// Subtract `amount` from the target's health (clamped at 0) and run death
/// side effects when it drops to 0. `towers` is the tower roster, needed to
/// find the king tower of a fallen princess tower.
pub fn apply_damage(
    world: &mut World,
    towers: &[Entity],
    target: Entity,
    amount: f64,
    events: &mut Vec<GameEvent>,
) -> DamageOutcome {
    {
        let Ok(mut health) = world.get::<&mut Health>(target) else {
            return DamageOutcome::Ignored;
        };
        if health.dead {
            return DamageOutcome::Ignored;
        }

        health.current = (health.current - amount).max(0.0);
        if health.current > 0.0 {
            return DamageOutcome::Survived;
        }
        health.dead = true;
    }

    on_death(world, towers, target, events);
    DamageOutcome::Died
}

fn on_death(world: &mut World, towers: &[Entity], entity: Entity, events: &mut Vec<GameEvent>) {
    let side = match world.get::<&Owner>(entity) {
        Ok(owner) => owner.0,
        Err(_) => return,
    };
    let id = entity_id(entity);

    if let Ok(mut troop) = world.get::<&mut Troop>(entity) {
        troop.state = TroopState::Dead;
        troop.target = None;
        tracing::debug!(id, kind = ?troop.kind, ?side, "troop died");
        events.push(GameEvent::TroopDied {
            id,
            kind: troop.kind,
            side,
        });
        return;
    }

    let kind = match world.get::<&mut Tower>(entity) {
        Ok(mut tower) => {
            tower.active = false;
            tower.target = None;
            tower.kind
        }
        Err(_) => return,
    };

    tracing::info!(id, ?kind, ?side, "tower destroyed");
    events.push(GameEvent::TowerDestroyed { id, kind, side });

    if kind == TowerKind::Princess {
        activate_king_if_exposed(world, towers, side, events);
    }
}

/// Wake `side`'s king tower once all of its princess towers are dead.
/// Returns true only on the activating call.
pub fn activate_king_if_exposed(
    world: &mut World,
    towers: &[Entity],
    side: Side,
    events: &mut Vec<GameEvent>,
) -> bool {
    let mut king = None;

    for &entity in towers {
        let owned = world
            .get::<&Owner>(entity)
            .map(|owner| owner.0 == side)
            .unwrap_or(false);
        if !owned {
            continue;
        }
        let (Ok(tower), Ok(health)) = (world.get::<&Tower>(entity), world.get::<&Health>(entity))
        else {
            continue;
        };

        match tower.kind {
            TowerKind::Princess if !health.dead => return false,
            TowerKind::King if !health.dead => king = Some(entity),
            _ => {}
        }
    }

    let Some(king) = king else {
        return false;
    };
    let Ok(mut tower) = world.get::<&mut Tower>(king) else {
        return false;
    };
    if tower.active {
        return false;
    }

    tower.active = true;
    tracing::info!(?side, "king tower activated");
    events.push(GameEvent::KingActivated { side });
    true
}

/// The winner, once some side's king tower has fallen.
pub fn match_winner(world: &World, towers: &[Entity]) -> Option<Side> {
    towers.iter().find_map(|&entity| {
        let tower = world.get::<&Tower>(entity).ok()?;
        let health = world.get::<&Health>(entity).ok()?;
        let owner = world.get::<&Owner>(entity).ok()?;
        (tower.kind == TowerKind::King && health.dead).then(|| owner.0.opponent())
    })
}
