//! Simple heuristic agents.
//!
//! Coordinates are written from Red's point of view (top half of the board)
//! and mirrored across the river when the agent plays the focused side.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use clash_core::types::Position;

use crate::{Agent, Deployer};

/// Hand slots the random agent chooses from.
const RANDOM_SLOTS: std::ops::Range<usize> = 0..3;
const RANDOM_X: std::ops::Range<f64> = 50.0..400.0;
const RANDOM_Y: std::ops::Range<f64> = 80.0..291.0;

const LANE_SLOT: usize = 2;
const LANE_POINT: (f64, f64) = (100.0, 200.0);

const ONE_SHOT_SLOT: usize = 0;
const ONE_SHOT_POINT: (f64, f64) = (100.0, 240.0);

/// Map a point on Red's half to the deployer's own half.
fn own_half(deployer: &dyn Deployer, x: f64, y: f64) -> Position {
    let pos = Position::new(x, y);
    if deployer.side().is_focused() {
        pos.mirrored()
    } else {
        pos
    }
}

fn can_afford(deployer: &dyn Deployer, hand_index: usize) -> bool {
    deployer
        .cost_of(hand_index)
        .is_some_and(|cost| deployer.elixir() >= cost)
}

/// Waits until the chosen slot is affordable, drops it somewhere on its own
/// half, then picks a new slot.
pub struct RandomAgent {
    rng: ChaCha8Rng,
    choice: usize,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let choice = rng.gen_range(RANDOM_SLOTS);
        Self { rng, choice }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &'static str {
        "random"
    }

    fn tick(&mut self, _dt: f64, deployer: &mut dyn Deployer) {
        if !can_afford(deployer, self.choice) {
            return;
        }

        let x = self.rng.gen_range(RANDOM_X).floor();
        let y = self.rng.gen_range(RANDOM_Y).floor();
        let pos = own_half(deployer, x, y);
        deployer.place_card(pos.x, pos.y, self.choice);

        self.choice = self.rng.gen_range(RANDOM_SLOTS);
    }
}

/// Plays the same hand slot at the same spot whenever it can.
#[derive(Debug, Default)]
pub struct LaneAgent;

impl Agent for LaneAgent {
    fn name(&self) -> &'static str {
        "lane"
    }

    fn tick(&mut self, _dt: f64, deployer: &mut dyn Deployer) {
        if can_afford(deployer, LANE_SLOT) {
            let pos = own_half(deployer, LANE_POINT.0, LANE_POINT.1);
            deployer.place_card(pos.x, pos.y, LANE_SLOT);
        }
    }
}

/// Plays its first hand card once, as soon as it is affordable.
#[derive(Debug, Default)]
pub struct OneShotAgent {
    done: bool,
}

impl Agent for OneShotAgent {
    fn name(&self) -> &'static str {
        "one_shot"
    }

    fn tick(&mut self, _dt: f64, deployer: &mut dyn Deployer) {
        if self.done || !can_afford(deployer, ONE_SHOT_SLOT) {
            return;
        }
        // Deployed where the scripted scenario wants it, not mirrored.
        self.done = deployer.place_card(ONE_SHOT_POINT.0, ONE_SHOT_POINT.1, ONE_SHOT_SLOT);
    }
}

/// Never deploys anything.
#[derive(Debug, Default)]
pub struct IdleAgent;

impl Agent for IdleAgent {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn tick(&mut self, _dt: f64, _deployer: &mut dyn Deployer) {}
}
