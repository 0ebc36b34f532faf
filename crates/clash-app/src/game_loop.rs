//! Match drivers.
//!
//! Headless mode ticks a fresh `Game` with a constant dt as fast as it can,
//! once per iteration. Realtime mode runs one match on its own thread with
//! wall-clock dt, paced to the configured tick rate. Commands arrive via an
//! `mpsc` channel and the latest snapshot is kept in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;

use clash_core::enums::Side;
use clash_core::events::GameEvent;
use clash_core::state::GameStateSnapshot;
use clash_sim::Game;

use crate::config::{ConfigError, RunConfig};
use crate::observers::{BoardLog, EventLog};
use crate::state::{LoopCommand, LoopHandle};

#[derive(Debug, Error)]
pub enum LoopError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Outcome of one match.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchSummary {
    pub iteration: u32,
    pub seed: u64,
    pub ticks: u64,
    /// Simulated seconds.
    pub elapsed_secs: f64,
    /// `None` if the tick budget ran out or the match was stopped.
    pub winner: Option<Side>,
    /// Indexed by `Side::index`.
    pub cards_played: [u32; 2],
    pub troops_spawned: [u32; 2],
    /// Towers lost by each side.
    pub towers_lost: [u32; 2],
}

impl MatchSummary {
    fn new(iteration: u32, seed: u64) -> Self {
        Self {
            iteration,
            seed,
            ..Default::default()
        }
    }

    fn record(&mut self, snapshot: &GameStateSnapshot) {
        self.ticks = snapshot.time.tick;
        self.elapsed_secs = snapshot.time.elapsed_secs;
        self.winner = snapshot.winner;

        for event in &snapshot.events {
            match event {
                GameEvent::CardPlayed { side, .. } => self.cards_played[side.index()] += 1,
                GameEvent::TroopSpawned { side, .. } => self.troops_spawned[side.index()] += 1,
                GameEvent::TowerDestroyed { side, .. } => self.towers_lost[side.index()] += 1,
                _ => {}
            }
        }
    }
}

/// Seed handed to a match; each iteration gets its own.
fn match_seed(config: &RunConfig, iteration: u32) -> u64 {
    config.seed.wrapping_add(u64::from(iteration))
}

/// Build a game with both agents and the logging observers attached.
fn new_game(config: &RunConfig, seed: u64) -> Result<Game, ConfigError> {
    let mut game = Game::with_agents(
        config.sim_config(seed)?,
        clash_agents::build(config.blue, seed),
        clash_agents::build(config.red, !seed),
    );
    game.add_observer(EventLog);
    Ok(game)
}

/// Play `config.iterations` matches back to back with a fixed dt.
pub fn run_headless(config: &RunConfig) -> Result<Vec<MatchSummary>, ConfigError> {
    config.validate()?;
    let dt = config.dt();

    (0..config.iterations)
        .map(|iteration| {
            let seed = match_seed(config, iteration);
            let mut game = new_game(config, seed)?;
            let mut summary = MatchSummary::new(iteration, seed);

            let started = Instant::now();
            while game.is_running() && game.time().tick < config.ticks {
                let snapshot = game.tick(dt);
                summary.record(&snapshot);
            }

            tracing::info!(
                iteration,
                seed,
                ticks = summary.ticks,
                winner = ?summary.winner,
                wall_ms = started.elapsed().as_millis() as u64,
                "match finished"
            );
            Ok(summary)
        })
        .collect()
}

/// Spawns the realtime game loop in a new thread.
///
/// Returns the handle the host uses to send commands and collect the result.
pub fn spawn_game_loop(config: RunConfig) -> Result<LoopHandle, LoopError> {
    config.validate()?;
    let seed = match_seed(&config, 0);
    let mut game = new_game(&config, seed)?;
    game.add_observer(BoardLog::new(u64::from(config.tick_rate)));

    let (command_tx, command_rx) = mpsc::channel::<LoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("clash-game-loop".into())
        .spawn(move || run_game_loop(game, &config, seed, command_rx, &shared))?;

    Ok(LoopHandle {
        command_tx,
        latest_snapshot,
        thread,
    })
}

/// Nominal duration of one tick.
fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// The game loop. Runs until the match ends, the tick budget is spent, or a
/// Shutdown command or channel disconnect arrives.
fn run_game_loop(
    mut game: Game,
    config: &RunConfig,
    seed: u64,
    command_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> MatchSummary {
    let tick_duration = tick_duration(config.tick_rate);
    let mut summary = MatchSummary::new(0, seed);
    let mut last_tick = Instant::now();
    let mut next_tick_time = last_tick;

    loop {
        // 1. Drain all pending commands
        let mut pending = Vec::new();
        loop {
            match command_rx.try_recv() {
                Ok(LoopCommand::Player(command)) => pending.push(command),
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::info!(tick = summary.ticks, "game loop shutting down");
                    return summary;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }
        game.queue_commands(pending);

        // 2. Advance one tick by the wall-clock time since the last one
        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f64();
        last_tick = now;
        let snapshot = game.tick(dt);
        summary.record(&snapshot);

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if !game.is_running() || game.time().tick >= config.ticks {
            return summary;
        }

        // 4. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
