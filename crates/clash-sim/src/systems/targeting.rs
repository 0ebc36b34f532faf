//! Target selection for troops.
//!
//! The selection itself is a pure function over candidate snapshots so it
//! can be tested without a world; `candidates` gathers them from a roster.

use hecs::{Entity, World};

use clash_core::components::{Health, Owner, Troop};
use clash_core::constants::TARGET_ACQUISITION_RADIUS;
use clash_core::enums::Side;
use clash_core::types::Position;

/// Something a troop could target, as seen at scan time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub side: Side,
    pub position: Position,
    pub dead: bool,
    pub air: bool,
}

/// The scanning troop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scanner {
    pub side: Side,
    pub position: Position,
    pub can_hit_air: bool,
    pub target_buildings: bool,
}

/// Snapshot every rostered entity that has a position, owner and health.
pub fn candidates(world: &World, roster: &[Entity]) -> Vec<Candidate> {
    roster
        .iter()
        .filter_map(|&entity| {
            let position = *world.get::<&Position>(entity).ok()?;
            let side = world.get::<&Owner>(entity).ok()?.0;
            let dead = world.get::<&Health>(entity).ok()?.dead;
            let air = world.get::<&Troop>(entity).map(|t| t.air).unwrap_or(false);
            Some(Candidate {
                entity,
                side,
                position,
                dead,
                air,
            })
        })
        .collect()
}

/// Nearest opposing, live, hittable candidate by squared distance.
/// Ties go to the first one encountered.
pub fn nearest(scanner: &Scanner, candidates: &[Candidate]) -> Option<(Entity, f64)> {
    let mut best: Option<(Entity, f64)> = None;

    for c in candidates {
        if c.side == scanner.side || c.dead {
            continue;
        }
        if c.air && !scanner.can_hit_air {
            continue;
        }

        let dist_sq = scanner.position.distance_sq_to(&c.position);
        let closer = match best {
            Some((_, best_sq)) => dist_sq < best_sq,
            None => true,
        };
        if closer {
            best = Some((c.entity, dist_sq));
        }
    }

    best
}

/// Pick a fresh target: a nearby enemy troop if one is inside the
/// acquisition radius (and the scanner fights troops at all), otherwise
/// the nearest enemy building.
pub fn select_target(
    scanner: &Scanner,
    troops: &[Candidate],
    towers: &[Candidate],
) -> Option<Entity> {
    let closest_troop = nearest(scanner, troops);
    let closest_building = nearest(scanner, towers).map(|(entity, _)| entity);

    if scanner.target_buildings {
        return closest_building;
    }

    match closest_troop {
        Some((entity, dist_sq))
            if dist_sq <= TARGET_ACQUISITION_RADIUS * TARGET_ACQUISITION_RADIUS =>
        {
            Some(entity)
        }
        _ => closest_building,
    }
}

/// Keep the current target only while it is live.
pub fn revalidate(current: Option<Entity>, is_live: impl Fn(Entity) -> bool) -> Option<Entity> {
    current.filter(|&entity| is_live(entity))
}
