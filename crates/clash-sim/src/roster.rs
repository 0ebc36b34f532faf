//! Live entity rosters.
//!
//! hecs does not preserve insertion order across despawns, so the engine
//! keeps its own spawn-ordered lists. Every per-tick pass walks a roster,
//! which keeps iteration order (and therefore tie-breaking) deterministic.

use hecs::Entity;

#[derive(Debug, Clone, Default)]
pub struct Rosters {
    /// Live troops in spawn order. Dead troops are removed by cleanup.
    pub troops: Vec<Entity>,
    /// All towers, dead or alive. Towers are never re-created.
    pub towers: Vec<Entity>,
    /// In-flight projectiles in spawn order.
    pub projectiles: Vec<Entity>,
}

/// Stable numeric id for an entity, used in snapshots and events.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}
