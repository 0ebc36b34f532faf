//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Position on the arena plane (screen-style: x right, y down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to another position. Used for all radius checks.
    pub fn distance_sq_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        self.distance_sq_to(other).sqrt()
    }

    /// True if `other` lies within `radius` of this position (inclusive).
    pub fn within(&self, other: &Position, radius: f64) -> bool {
        self.distance_sq_to(other) <= radius * radius
    }

    /// Facing angle toward another position in degrees.
    /// 0° points along +x, 90° points up the screen (toward -y).
    pub fn heading_deg_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (-dy).atan2(dx).to_degrees()
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Mirror across the river for the other side of the board.
    pub fn mirrored(&self) -> Self {
        Self {
            x: self.x,
            y: crate::constants::ARENA_HEIGHT - self.y,
        }
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Unit vector for a facing angle in degrees (screen-style, +y down).
pub fn heading_vector(direction_deg: f64) -> DVec2 {
    let rad = direction_deg.to_radians();
    DVec2::new(rad.cos(), -rad.sin())
}
