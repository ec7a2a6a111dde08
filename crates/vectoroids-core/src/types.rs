//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in world units. The world is a torus centered on the
/// origin; wrapping is handled by [`WorldBounds::wrap`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each simulated tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Rectangular extent of the toroidal play field, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position (no torus shortcut).
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn dvec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_dvec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Speed magnitude in units per second.
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Direction of travel in radians, measured from +X counterclockwise.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn dvec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_dvec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

impl WorldBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Wrap a position onto the torus. A coordinate that leaves one edge
    /// re-enters from the opposite edge, matching the single-step wrap
    /// applied each tick (entities never travel more than one world span
    /// per tick).
    pub fn wrap(&self, pos: &mut Position) {
        let hw = self.half_width();
        let hh = self.half_height();

        if pos.x > hw {
            pos.x -= self.width;
        } else if pos.x < -hw {
            pos.x += self.width;
        }

        if pos.y > hh {
            pos.y -= self.height;
        } else if pos.y < -hh {
            pos.y += self.height;
        }
    }

    pub fn contains(&self, pos: &Position) -> bool {
        pos.x.abs() <= self.half_width() && pos.y.abs() <= self.half_height()
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: crate::constants::WORLD_WIDTH,
            height: crate::constants::WORLD_HEIGHT,
        }
    }
}
