//! Core types and definitions for the CLASH arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, stat tables, commands, state snapshots, events, and constants.
//! It has no engine logic and no dependency on any runtime or renderer.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod stats;
pub mod types;
