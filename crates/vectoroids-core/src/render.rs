//! Renderer adapter contract.
//!
//! The simulation never depends on renderer internals; the presentation
//! layer implements this trait and the scene mirror drives it from
//! snapshots. Handles are opaque to everything but the implementation.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Opaque handle to a created shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeHandle(pub u64);

/// How the geometry points are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Open polyline through the points.
    Lines,
    /// Closed outline (last point connects back to the first).
    Loop,
}

/// RGB color, 0.0–1.0 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
    pub const GREY: Color = Color {
        r: 0.8,
        g: 0.8,
        b: 0.8,
    };
}

/// Narrow drawing contract the core calls into. Geometry is given once
/// at creation in model space; pose updates are position/rotation only.
pub trait ShapeRenderer {
    fn create_shape(&mut self, kind: ShapeKind, points: &[Position], color: Color) -> ShapeHandle;
    fn set_position(&mut self, handle: ShapeHandle, x: f64, y: f64);
    fn set_rotation(&mut self, handle: ShapeHandle, radians: f64);
    fn set_visible(&mut self, handle: ShapeHandle, visible: bool);
    fn destroy(&mut self, handle: ShapeHandle);
}
