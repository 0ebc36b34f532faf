//! Elixir accrual.

use clash_core::constants::{ELIXIR_MAX, ELIXIR_PER_SECOND};

use crate::player::Player;

/// Add `ELIXIR_PER_SECOND * dt` to every player, clamped to [0, ELIXIR_MAX].
pub fn run(players: &mut [Player], dt: f64) {
    for player in players {
        player.elixir = (player.elixir + ELIXIR_PER_SECOND * dt).clamp(0.0, ELIXIR_MAX);
    }
}
