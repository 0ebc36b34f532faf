//! Simulation engine: owns the world and runs the fixed tick order.
//!
//! `Game` owns the hecs ECS world, both players, their agents and the
//! observers. Each `tick` runs the passes in a fixed order and produces a
//! `GameStateSnapshot`. Completely headless, so any number of games can run
//! side by side or back to back.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use clash_agents::Agent;
use clash_core::commands::PlayerCommand;
use clash_core::constants::{DECK_SIZE, PLACEMENT_JITTER, STARTING_ELIXIR};
use clash_core::enums::{CardKind, Side, TroopKind};
use clash_core::events::GameEvent;
use clash_core::state::GameStateSnapshot;
use clash_core::stats::{CardEffect, DEFAULT_DECK};
use clash_core::types::{Position, SimTime};

use crate::observer::{Observer, ObserverId};
use crate::placement::{PlacementError, Seat};
use crate::player::Player;
use crate::roster::{entity_id, Rosters};
use crate::systems;
use crate::systems::combat::{self, DamageOutcome};
use crate::world_setup;

/// Configuration for starting a new match.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and dt sequence = same match.
    pub seed: u64,
    pub starting_elixir: f64,
    pub blue_deck: [CardKind; DECK_SIZE],
    pub red_deck: [CardKind; DECK_SIZE],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            starting_elixir: STARTING_ELIXIR,
            blue_deck: DEFAULT_DECK,
            red_deck: DEFAULT_DECK,
        }
    }
}

/// One match. Owns the ECS world and all sim state.
pub struct Game {
    world: World,
    rosters: Rosters,
    players: [Player; 2],
    agents: [Option<Box<dyn Agent>>; 2],
    observers: Vec<(ObserverId, Box<dyn Observer>)>,
    next_observer_id: u64,
    time: SimTime,
    running: bool,
    winner: Option<Side>,
    stop_requested: bool,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a match with both sides' towers in place and no agents.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        let mut rosters = Rosters::default();
        let kings = world_setup::setup_match(&mut world, &mut rosters);

        let mut players = [
            Player::new(Side::Blue, config.starting_elixir, config.blue_deck),
            Player::new(Side::Red, config.starting_elixir, config.red_deck),
        ];
        for side in Side::ALL {
            players[side.index()].king_tower = Some(kings[side.index()]);
        }

        Self {
            world,
            rosters,
            players,
            agents: [None, None],
            observers: Vec::new(),
            next_observer_id: 0,
            time: SimTime::default(),
            running: true,
            winner: None,
            stop_requested: false,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_agents(config: SimConfig, blue: Box<dyn Agent>, red: Box<dyn Agent>) -> Self {
        let mut game = Self::new(config);
        game.set_agent(Side::Blue, blue);
        game.set_agent(Side::Red, red);
        game
    }

    pub fn set_agent(&mut self, side: Side, agent: Box<dyn Agent>) {
        self.agents[side.index()] = Some(agent);
    }

    pub fn add_observer(&mut self, observer: impl Observer + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Unregister an observer. Unknown ids are ignored.
    pub fn remove_observer(&mut self, id: ObserverId) -> Option<Box<dyn Observer>> {
        let index = self.observers.iter().position(|(oid, _)| *oid == id)?;
        Some(self.observers.remove(index).1)
    }

    /// Queue a player command for the deployment step of the next tick.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the match by `dt` seconds and return the resulting snapshot.
    /// Does nothing once the match has stopped.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        if !self.running {
            return self.snapshot();
        }

        systems::elixir::run(&mut self.players, dt);

        self.process_commands();
        self.run_agents(dt);

        systems::troop::run(&mut self.world, &mut self.rosters, dt, &mut self.events);
        systems::projectile::run(
            &mut self.world,
            &self.rosters,
            dt,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        systems::tower::run(&mut self.world, &mut self.rosters, dt, &mut self.events);
        systems::cleanup::run(&mut self.world, &mut self.rosters, &mut self.despawn_buffer);

        self.time.advance(dt);

        if self.winner.is_none() {
            if let Some(winner) = combat::match_winner(&self.world, &self.rosters.towers) {
                tracing::info!(?winner, tick = self.time.tick, "match over");
                self.winner = Some(winner);
                self.events.push(GameEvent::MatchOver { winner });
            }
        }
        if self.winner.is_some() || self.stop_requested {
            self.running = false;
        }

        let events = std::mem::take(&mut self.events);
        let snapshot = systems::snapshot::build_snapshot(
            &self.world,
            &self.rosters,
            &self.players,
            self.time,
            dt,
            self.running,
            self.winner,
            events,
        );

        let mut keep_running = true;
        for (_, observer) in &mut self.observers {
            keep_running &= observer.update(dt, &snapshot);
        }
        if !keep_running {
            tracing::debug!(tick = self.time.tick, "observer requested stop");
            self.running = false;
        }

        snapshot
    }

    /// Play a card. Returns false if the placement was rejected.
    pub fn place_card(&mut self, side: Side, x: f64, y: f64, hand_index: usize) -> bool {
        match self.try_place_card(side, x, y, hand_index) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(?side, hand_index, %err, "placement rejected");
                false
            }
        }
    }

    /// Play the card in `hand_index` for `side` at (x, y), then charge its
    /// cost and cycle the deck.
    pub fn try_place_card(
        &mut self,
        side: Side,
        x: f64,
        y: f64,
        hand_index: usize,
    ) -> Result<(), PlacementError> {
        if !self.running {
            return Err(PlacementError::MatchOver);
        }

        let player = &self.players[side.index()];
        let card = *player
            .deck
            .hand_card(hand_index)
            .ok_or(PlacementError::InvalidHandIndex(hand_index))?;
        let def = card.def();
        if !player.can_afford(hand_index) {
            return Err(PlacementError::InsufficientElixir {
                cost: def.cost,
                available: player.elixir,
            });
        }

        let position = Position::new(x, y);
        match def.effect {
            CardEffect::Troops { kind, count } => {
                // Elixir is checked once above and charged once below, so a
                // multi-unit card always places every unit.
                for _ in 0..count {
                    let at = if count > 1 {
                        let dx = self.rng.gen_range(-PLACEMENT_JITTER..PLACEMENT_JITTER);
                        let dy = self.rng.gen_range(-PLACEMENT_JITTER..PLACEMENT_JITTER);
                        Position::new(x + f64::from(dx), y + f64::from(dy))
                    } else {
                        position
                    };
                    self.spawn_troop(at, kind, side);
                }
            }
            CardEffect::Spell {
                damage,
                radius,
                speed,
            } => {
                let king = self.players[side.index()]
                    .king_tower
                    .filter(|&king| combat::is_live(&self.world, king))
                    .ok_or(PlacementError::NoLaunchTower)?;
                let origin = *self
                    .world
                    .get::<&Position>(king)
                    .map_err(|_| PlacementError::NoLaunchTower)?;
                self.spawn_area_projectile(origin, side, Some(king), position, damage, speed, radius);
            }
        }

        let player = &mut self.players[side.index()];
        player.elixir = (player.elixir - def.cost).max(0.0);
        player.deck.cycle(hand_index);

        tracing::debug!(?side, card = def.name, x, y, elixir = player.elixir, "card played");
        self.events.push(GameEvent::CardPlayed {
            side,
            card: card.kind,
            position,
        });
        Ok(())
    }

    /// Spawn a troop for `side` and add it to the live roster.
    pub fn spawn_troop(&mut self, position: Position, kind: TroopKind, side: Side) -> Entity {
        let entity = world_setup::spawn_troop(&mut self.world, &mut self.rosters, position, kind, side);
        self.events.push(GameEvent::TroopSpawned {
            id: entity_id(entity),
            kind,
            side,
        });
        entity
    }

    /// Spawn a straight projectile aimed at `target`'s current position.
    /// Returns `None` if the target has no position.
    pub fn spawn_projectile(
        &mut self,
        origin: Position,
        side: Side,
        source: Option<Entity>,
        target: Entity,
        damage: f64,
        speed: f64,
    ) -> Option<Entity> {
        let aim = *self.world.get::<&Position>(target).ok()?;
        Some(world_setup::spawn_projectile(
            &mut self.world,
            &mut self.rosters,
            origin,
            side,
            source,
            target,
            aim,
            damage,
            speed,
        ))
    }

    /// Spawn an area projectile that detonates at `target_pos`.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_area_projectile(
        &mut self,
        origin: Position,
        side: Side,
        source: Option<Entity>,
        target_pos: Position,
        damage: f64,
        speed: f64,
        radius: f64,
    ) -> Entity {
        world_setup::spawn_area_projectile(
            &mut self.world,
            &mut self.rosters,
            origin,
            side,
            source,
            target_pos,
            damage,
            speed,
            radius,
        )
    }

    /// Remove an entity from the world and every roster. Absent entities are
    /// ignored.
    pub fn despawn(&mut self, entity: Entity) {
        self.rosters.troops.retain(|&e| e != entity);
        self.rosters.projectiles.retain(|&e| e != entity);
        self.rosters.towers.retain(|&e| e != entity);
        let _ = self.world.despawn(entity);
    }

    /// Damage an entity directly, with the same death handling as an attack.
    pub fn apply_damage(&mut self, target: Entity, amount: f64) -> DamageOutcome {
        combat::apply_damage(
            &mut self.world,
            &self.rosters.towers,
            target,
            amount,
            &mut self.events,
        )
    }

    /// Build a snapshot of the current state without advancing time.
    /// Events pending for the next tick are not included.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.rosters,
            &self.players,
            self.time,
            0.0,
            self.running,
            self.winner,
            Vec::new(),
        )
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    /// Live troops in spawn order.
    pub fn troops(&self) -> &[Entity] {
        &self.rosters.troops
    }

    /// All towers, including destroyed ones.
    pub fn towers(&self) -> &[Entity] {
        &self.rosters.towers
    }

    pub fn projectiles(&self) -> &[Entity] {
        &self.rosters.projectiles
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Overwrite a player's elixir (clamped). For scripted setups.
    pub fn set_elixir(&mut self, side: Side, elixir: f64) {
        self.players[side.index()].elixir =
            elixir.clamp(0.0, clash_core::constants::ELIXIR_MAX);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::PlaceCard {
                side,
                x,
                y,
                hand_index,
            } => {
                self.place_card(side, x, y, hand_index);
            }
            PlayerCommand::EndMatch => {
                tracing::debug!(tick = self.time.tick, "end of match requested");
                self.stop_requested = true;
            }
        }
    }

    /// Let each side's agent deploy. The agent is taken out for the call so
    /// it can act through a seat that borrows the game.
    fn run_agents(&mut self, dt: f64) {
        for side in Side::ALL {
            let Some(mut agent) = self.agents[side.index()].take() else {
                continue;
            };
            agent.tick(dt, &mut Seat { game: self, side });
            self.agents[side.index()] = Some(agent);
        }
    }
}
