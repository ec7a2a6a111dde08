//! Game state snapshot — the complete visible state emitted after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, SizeCategory};
use crate::events::TelemetryEvent;
use crate::types::{Position, SimTime};

/// Complete visible state broadcast to the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Absent while the ship is destroyed or before a game starts.
    pub ship: Option<ShipView>,
    pub bullets: Vec<BulletView>,
    pub asteroids: Vec<AsteroidView>,
    pub fragments: Vec<FragmentView>,
    pub hud: HudView,
    /// Telemetry accumulated during this tick.
    pub telemetry: Vec<TelemetryEvent>,
}

/// Ship pose and shield state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipView {
    pub position: Position,
    /// Facing angle (radians, 0 = +X).
    pub rotation: f64,
    pub shield_active: bool,
    /// Shield visual on/off per the flash duty cycle.
    pub shield_visible: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulletView {
    pub render_id: u32,
    pub position: Position,
    /// Direction of travel (radians).
    pub rotation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidView {
    pub render_id: u32,
    pub position: Position,
    pub rotation: f64,
    pub size: f64,
    pub category: SizeCategory,
    /// Jittered outline in model space, sent once per entity and keyed
    /// by `render_id` on the far side.
    pub shape: Vec<Position>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FragmentView {
    pub render_id: u32,
    pub position: Position,
    pub rotation: f64,
    pub length: f64,
}

/// Derived display data for the heads-up display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    /// Flashing prompt state; only meaningful in [`GamePhase::GameOver`].
    pub insert_coin_visible: bool,
}
