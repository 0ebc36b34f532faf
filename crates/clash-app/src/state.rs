//! Handle to the realtime loop thread and the state it shares with the host.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use clash_core::commands::PlayerCommand;
use clash_core::state::GameStateSnapshot;

use crate::game_loop::MatchSummary;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the game.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Owned by the host while the loop thread runs.
pub struct LoopHandle {
    pub(crate) command_tx: mpsc::Sender<LoopCommand>,
    /// Updated by the game loop thread after each tick.
    pub(crate) latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub(crate) thread: JoinHandle<MatchSummary>,
}

impl LoopHandle {
    /// Forward a command. Returns false once the loop has exited.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx.send(LoopCommand::Player(command)).is_ok()
    }

    /// Most recent snapshot, if the loop has ticked at least once.
    pub fn latest_snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|snapshot| snapshot.clone())
    }

    /// Ask the loop to stop and wait for its summary.
    pub fn shutdown(self) -> Option<MatchSummary> {
        let _ = self.command_tx.send(LoopCommand::Shutdown);
        self.join()
    }

    /// Wait for the match to end on its own. `None` if the loop panicked.
    pub fn join(self) -> Option<MatchSummary> {
        self.thread.join().ok()
    }
}
