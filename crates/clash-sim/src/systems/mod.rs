//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` plus the rosters (or `&World`
//! for read-only). They do not own state; all state lives in components,
//! rosters and players.

pub mod cleanup;
pub mod combat;
pub mod elixir;
pub mod projectile;
pub mod snapshot;
pub mod steering;
pub mod targeting;
pub mod tower;
pub mod troop;
