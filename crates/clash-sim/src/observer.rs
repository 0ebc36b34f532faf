//! Per-tick observers.
//!
//! An observer sees each tick's snapshot after all entity updates have run.
//! It cannot touch the world; returning `false` asks the game to stop.

use clash_core::state::GameStateSnapshot;

/// Handle returned by `Game::add_observer`, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

pub trait Observer: Send {
    /// Returns whether the host should keep running.
    fn update(&mut self, dt: f64, snapshot: &GameStateSnapshot) -> bool;
}

impl<F> Observer for F
where
    F: FnMut(f64, &GameStateSnapshot) -> bool + Send,
{
    fn update(&mut self, dt: f64, snapshot: &GameStateSnapshot) -> bool {
        self(dt, snapshot)
    }
}
