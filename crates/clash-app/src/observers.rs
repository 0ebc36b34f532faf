//! Observers the runner attaches to a match.
//!
//! With no renderer in the loop, these are how a running match is seen.

use clash_core::events::GameEvent;
use clash_core::state::GameStateSnapshot;
use clash_sim::Observer;

/// Logs every game event as it happens.
#[derive(Debug, Default)]
pub struct EventLog;

impl Observer for EventLog {
    fn update(&mut self, _dt: f64, snapshot: &GameStateSnapshot) -> bool {
        let tick = snapshot.time.tick;
        for event in &snapshot.events {
            match event {
                GameEvent::TowerDestroyed { kind, side, .. } => {
                    tracing::info!(tick, ?kind, ?side, "tower destroyed");
                }
                GameEvent::KingActivated { side } => {
                    tracing::info!(tick, ?side, "king tower activated");
                }
                GameEvent::MatchOver { winner } => {
                    tracing::info!(tick, ?winner, "match over");
                }
                GameEvent::CardPlayed {
                    side,
                    card,
                    position,
                } => {
                    tracing::debug!(tick, ?side, ?card, x = position.x, y = position.y, "card played");
                }
                other => tracing::trace!(tick, ?other, "event"),
            }
        }
        true
    }
}

/// Logs a one-line board summary every `every` ticks. Stands in for a
/// renderer in realtime mode.
#[derive(Debug)]
pub struct BoardLog {
    every: u64,
}

impl BoardLog {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl Observer for BoardLog {
    fn update(&mut self, dt: f64, snapshot: &GameStateSnapshot) -> bool {
        if snapshot.time.tick % self.every != 0 {
            return true;
        }

        let elixir: Vec<String> = snapshot
            .players
            .iter()
            .map(|p| format!("{:?}={:.1}", p.side, p.elixir))
            .collect();
        let towers_up = snapshot.towers.iter().filter(|t| !t.dead).count();

        tracing::info!(
            tick = snapshot.time.tick,
            elapsed_secs = snapshot.time.elapsed_secs,
            dt,
            troops = snapshot.troops.len(),
            projectiles = snapshot.projectiles.len(),
            towers_up,
            elixir = %elixir.join(" "),
            "board"
        );
        true
    }
}
