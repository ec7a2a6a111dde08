//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Discrete asteroid size bucket, derived from the continuous size value
/// by fixed thresholds. Drives hit radius, mass, points, and splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeCategory {
    Tiny,
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl SizeCategory {
    /// Categorize a continuous size value by the fixed threshold table.
    pub fn from_size(size: f64) -> Self {
        if size > 10.0 {
            SizeCategory::ExtraLarge
        } else if size > 7.5 {
            SizeCategory::Large
        } else if size > 4.0 {
            SizeCategory::Medium
        } else if size > 2.0 {
            SizeCategory::Small
        } else {
            SizeCategory::Tiny
        }
    }

    /// Collision radius. Strictly decreasing with rank; decoupled from
    /// the jittered render outline.
    pub fn hit_radius(self) -> f64 {
        match self {
            SizeCategory::ExtraLarge => 12.0,
            SizeCategory::Large => 7.5,
            SizeCategory::Medium => 4.0,
            SizeCategory::Small => 3.0,
            SizeCategory::Tiny => 2.0,
        }
    }

    /// Points awarded when destroyed by a bullet.
    pub fn points(self) -> u32 {
        match self {
            SizeCategory::ExtraLarge => 1,
            SizeCategory::Large => 2,
            SizeCategory::Medium => 5,
            SizeCategory::Small => 10,
            SizeCategory::Tiny => 20,
        }
    }

    /// Collision mass, a monotonic step function of category.
    pub fn mass(self) -> f64 {
        match self {
            SizeCategory::ExtraLarge => 16.0,
            SizeCategory::Large => 8.0,
            SizeCategory::Medium => 4.0,
            SizeCategory::Small => 2.0,
            SizeCategory::Tiny => 1.0,
        }
    }

    /// Size assigned to the two children when split, or `None` for tiny
    /// asteroids (destroyed outright). Each child size re-categorizes to
    /// exactly the next rank down.
    pub fn child_size(self) -> Option<f64> {
        match self {
            SizeCategory::ExtraLarge => Some(10.0),
            SizeCategory::Large => Some(6.0),
            SizeCategory::Medium => Some(3.0),
            SizeCategory::Small => Some(1.5),
            SizeCategory::Tiny => None,
        }
    }

    /// Ordinal rank, tiny = 0.
    pub fn rank(self) -> u8 {
        match self {
            SizeCategory::Tiny => 0,
            SizeCategory::Small => 1,
            SizeCategory::Medium => 2,
            SizeCategory::Large => 3,
            SizeCategory::ExtraLarge => 4,
        }
    }

    pub fn all() -> [SizeCategory; 5] {
        [
            SizeCategory::Tiny,
            SizeCategory::Small,
            SizeCategory::Medium,
            SizeCategory::Large,
            SizeCategory::ExtraLarge,
        ]
    }
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    GameOver,
}

/// Ship lifecycle within an active game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipPhase {
    /// Ship present and simulated.
    #[default]
    Alive,
    /// Ship destroyed; a respawn deadline may be pending.
    Dead,
}

/// Policy for the respawn countdown while the game is paused.
///
/// The reference behavior lets the wall-clock countdown keep running
/// during pause, so a ship can respawn mid-pause. That is preserved as
/// the default; `SuspendOnPause` shifts pending deadlines by the paused
/// duration instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RespawnPolicy {
    #[default]
    WallClock,
    SuspendOnPause,
}
