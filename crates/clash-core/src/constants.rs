//! Simulation constants and tuning parameters.

/// Default tick rate for headless runs (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

/// Arena width in simulation units.
pub const ARENA_WIDTH: f64 = 450.0;

/// Arena height in simulation units.
pub const ARENA_HEIGHT: f64 = 600.0;

/// The river splits the board in half.
pub const RIVER_Y: f64 = ARENA_HEIGHT / 2.0;

/// Entities this far outside the arena are removed.
pub const OUT_OF_BOUNDS_MARGIN: f64 = 100.0;

// --- Elixir ---

/// Elixir gained per second (one unit every 2.8 s).
pub const ELIXIR_PER_SECOND: f64 = 1.0 / 2.8;

/// Elixir cap.
pub const ELIXIR_MAX: f64 = 10.0;

/// Elixir each player starts the match with.
pub const STARTING_ELIXIR: f64 = 5.0;

// --- Deck ---

/// Number of cards in a deck.
pub const DECK_SIZE: usize = 7;

/// The first HAND_SIZE deck slots are playable.
pub const HAND_SIZE: usize = 4;

/// Multi-unit cards scatter each unit by an integer offset in [-J, J).
pub const PLACEMENT_JITTER: i32 = 10;

// --- Targeting ---

/// Enemy troops closer than this are preferred over buildings.
pub const TARGET_ACQUISITION_RADIUS: f64 = 100.0;

/// Attack reach used by troops that do not override it.
pub const DEFAULT_ATTACK_RADIUS: f64 = 32.0;

// --- Steering ---

/// Troops closer than this push each other apart.
pub const MIN_SEPARATION: f64 = 30.0;

/// Scale applied to the summed separation vector.
pub const SEPARATION_STRENGTH: f64 = 40.0;

// --- Projectiles ---

/// A straight projectile hits when this close to its target.
pub const PROJECTILE_HIT_RADIUS: f64 = 16.0;

/// An area projectile detonates when this close to its aim point.
pub const AREA_ARRIVAL_EPSILON: f64 = 5.0;

/// Speed of tower shots.
pub const TOWER_PROJECTILE_SPEED: f64 = 300.0;

// --- Towers (Red layout; Blue is mirrored across the river) ---

pub const PRINCESS_TOWER_POSITIONS: [(f64, f64); 2] = [(100.0, 130.0), (350.0, 130.0)];
pub const KING_TOWER_POSITION: (f64, f64) = (225.0, 60.0);

pub const PRINCESS_TOWER_HEALTH: f64 = 2786.0;
pub const PRINCESS_TOWER_DAMAGE: f64 = 90.0;
pub const PRINCESS_TOWER_RANGE: f64 = 150.0;
/// Fire timer progress per second (one shot every 0.8 s).
pub const PRINCESS_TOWER_FIRE_RATE: f64 = 1.25;

pub const KING_TOWER_HEALTH: f64 = 4824.0;
pub const KING_TOWER_DAMAGE: f64 = 109.0;
pub const KING_TOWER_RANGE: f64 = 140.0;
pub const KING_TOWER_FIRE_RATE: f64 = 1.0;

// --- Spells ---

pub const FIREBALL_DAMAGE: f64 = 688.0;
pub const FIREBALL_RADIUS: f64 = 60.0;
pub const FIREBALL_SPEED: f64 = 300.0;
