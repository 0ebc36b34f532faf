//! Simulation engine for CLASH.
//!
//! Owns the hecs ECS world, advances it one externally supplied `dt` at a
//! time in a fixed pass order, and hands GameStateSnapshots to observers.

pub mod engine;
pub mod observer;
pub mod placement;
pub mod player;
pub mod roster;
pub mod systems;
pub mod world_setup;

pub use clash_core as core;
pub use engine::{Game, SimConfig};
pub use observer::{Observer, ObserverId};
pub use placement::PlacementError;

#[cfg(test)]
mod tests;
