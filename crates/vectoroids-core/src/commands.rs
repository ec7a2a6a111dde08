//! Player commands sent from the shell to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Game control ---
    /// Start a new game (from the menu or after game over).
    StartGame,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,

    // --- Ship control ---
    /// Replace the held-direction state (thrust intents).
    SetHeld {
        forward: bool,
        back: bool,
        strafe_left: bool,
        strafe_right: bool,
    },
    /// Point the ship at a world-space direction (radians, 0 = +X).
    SetAim { angle: f64 },
    /// Request a single shot (rate-limited by the fire cooldown).
    Fire,
    /// Toggle the slow-stop brake.
    ToggleBrake,
}

/// Current held-direction state, updated by [`PlayerCommand::SetHeld`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldDirections {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
}
