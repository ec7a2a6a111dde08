//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic. Capabilities
//! (a lifetime, a shield, a spin) are separate components attached to
//! the entities that need them rather than fields of a base record.

use serde::{Deserialize, Serialize};

use crate::enums::SizeCategory;

// Position and Velocity live in types.rs but double as ECS components.
pub use crate::types::{Position, Velocity};

/// Marks the player's ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipMarker;

/// Facing direction of the ship (radians, 0 = +X, counterclockwise).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Heading {
    pub angle: f64,
}

/// Post-spawn collision immunity with a terminal flashing cue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shield {
    /// Remaining ticks of immunity; 0 = expired.
    pub timer_ticks: u32,
    /// Whether the shield visual is currently shown (flash duty cycle).
    pub visible: bool,
}

impl Shield {
    pub fn full() -> Self {
        Self {
            timer_ticks: crate::constants::SHIELD_DURATION_TICKS,
            visible: true,
        }
    }

    pub fn active(&self) -> bool {
        self.timer_ticks > 0
    }
}

/// A fired bullet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    /// Remaining ticks before the bullet despawns.
    pub lifetime_ticks: u32,
}

/// An asteroid. `size` is the continuous spawn size; `category` is the
/// fixed bucket derived from it (kept rather than recomputed so the two
/// can never drift apart within an entity's lifetime).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asteroid {
    pub size: f64,
    pub category: SizeCategory,
    /// Tick on which this asteroid entered the world. Asteroids are not
    /// collision-eligible on their birth tick.
    pub born_tick: u64,
}

impl Asteroid {
    pub fn new(size: f64, born_tick: u64) -> Self {
        Self {
            size,
            category: SizeCategory::from_size(size),
            born_tick,
        }
    }

    pub fn hit_radius(&self) -> f64 {
        self.category.hit_radius()
    }

    pub fn mass(&self) -> f64 {
        self.category.mass()
    }
}

/// Short-lived debris segment from a ship explosion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fragment {
    /// Segment length in world units.
    pub length: f64,
}

/// Remaining lifetime in ticks for entities that expire on a timer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifetime {
    pub ticks: u32,
}

/// Visual rotation state for entities that tumble.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Spin {
    /// Current angle (radians).
    pub angle: f64,
    /// Angular velocity (rad/s).
    pub rate: f64,
}

/// Position at the start of the current tick's movement, recorded before
/// integration. The swept collision tests run over the
/// `PrevPosition → Position` displacement segment.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PrevPosition(pub Position);

/// Rendered polygon outline in model space (render-only; collision uses
/// the category hit radius).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shape {
    pub points: Vec<Position>,
}

/// Stable identifier handed to the presentation layer so it can track an
/// entity's shape across snapshots. Assigned once at spawn, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderId(pub u32);
