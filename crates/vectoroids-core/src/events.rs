//! Telemetry events emitted by the simulation.
//!
//! Telemetry is fire-and-forget: the engine buffers events during a tick
//! and hands them out with the snapshot. Sinks must never block the
//! simulation, and a failed sink has no effect on correctness.

use serde::{Deserialize, Serialize};

use crate::enums::SizeCategory;

/// Events describing notable simulation moments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TelemetryEvent {
    /// A bullet destroyed or split an asteroid.
    AsteroidHit {
        category: SizeCategory,
        points: u32,
        split: bool,
    },
    /// The ship was destroyed by an asteroid.
    ShipDestroyed { lives_remaining: u32 },
    /// The ship respawned at the origin.
    ShipRespawned,
    /// The post-spawn shield ran out.
    ShieldExpired,
    /// A new level began.
    LevelStarted { level: u32, asteroid_count: u32 },
    /// Lives exhausted.
    GameOver { score: u32 },
}

/// Fire-and-forget string-message channel for logging/telemetry.
///
/// Implementations must not block; errors are swallowed by design.
pub trait TelemetrySink {
    fn send(&self, message: &str);
}

/// Sink that discards everything (useful headless and in tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn send(&self, _message: &str) {}
}

impl TelemetryEvent {
    /// One-line human-readable form for string sinks.
    pub fn describe(&self) -> String {
        match self {
            TelemetryEvent::AsteroidHit {
                category,
                points,
                split,
            } => {
                if *split {
                    format!("asteroid split: {category:?} (+{points})")
                } else {
                    format!("asteroid destroyed: {category:?} (+{points})")
                }
            }
            TelemetryEvent::ShipDestroyed { lives_remaining } => {
                format!("ship destroyed, lives remaining: {lives_remaining}")
            }
            TelemetryEvent::ShipRespawned => "ship respawned".to_string(),
            TelemetryEvent::ShieldExpired => "shield expired".to_string(),
            TelemetryEvent::LevelStarted {
                level,
                asteroid_count,
            } => format!("level {level} started with {asteroid_count} asteroids"),
            TelemetryEvent::GameOver { score } => format!("game over, final score {score}"),
        }
    }
}
