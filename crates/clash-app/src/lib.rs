//! CLASH runner.
//!
//! Wires the simulation and agent crates into a headless batch runner and a
//! wall-clock realtime loop.

pub mod config;
pub mod game_loop;
pub mod observers;
pub mod state;

pub use clash_core as core;
