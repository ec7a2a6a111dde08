//! Scene mirror: diffs consecutive snapshots into renderer-adapter calls.
//!
//! The simulation knows nothing about shapes on screen; this layer keeps
//! a map from stable render ids to shape handles, creating shapes the
//! first time an entity appears, updating poses every frame, and
//! destroying shapes whose entities vanished. `BatchRenderer` collects
//! the resulting calls into one serializable batch per frame for the
//! display windows.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use vectoroids_core::constants::SHIP_RADIUS;
use vectoroids_core::render::{Color, ShapeHandle, ShapeKind, ShapeRenderer};
use vectoroids_core::state::GameStateSnapshot;
use vectoroids_core::types::Position;

/// One renderer-adapter call, in wire form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum RenderOp {
    Create {
        handle: ShapeHandle,
        kind: ShapeKind,
        points: Vec<Position>,
        color: Color,
    },
    SetPosition {
        handle: ShapeHandle,
        x: f64,
        y: f64,
    },
    SetRotation {
        handle: ShapeHandle,
        radians: f64,
    },
    SetVisible {
        handle: ShapeHandle,
        visible: bool,
    },
    Destroy {
        handle: ShapeHandle,
    },
}

/// Renderer implementation that batches calls for IPC emission.
#[derive(Debug, Default)]
pub struct BatchRenderer {
    next_handle: u64,
    ops: Vec<RenderOp>,
}

impl BatchRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the calls accumulated since the last frame.
    pub fn take_batch(&mut self) -> Vec<RenderOp> {
        std::mem::take(&mut self.ops)
    }
}

impl ShapeRenderer for BatchRenderer {
    fn create_shape(&mut self, kind: ShapeKind, points: &[Position], color: Color) -> ShapeHandle {
        let handle = ShapeHandle(self.next_handle);
        self.next_handle += 1;
        self.ops.push(RenderOp::Create {
            handle,
            kind,
            points: points.to_vec(),
            color,
        });
        handle
    }

    fn set_position(&mut self, handle: ShapeHandle, x: f64, y: f64) {
        self.ops.push(RenderOp::SetPosition { handle, x, y });
    }

    fn set_rotation(&mut self, handle: ShapeHandle, radians: f64) {
        self.ops.push(RenderOp::SetRotation { handle, radians });
    }

    fn set_visible(&mut self, handle: ShapeHandle, visible: bool) {
        self.ops.push(RenderOp::SetVisible { handle, visible });
    }

    fn destroy(&mut self, handle: ShapeHandle) {
        self.ops.push(RenderOp::Destroy { handle });
    }
}

/// Tracks which simulation entity owns which shape.
#[derive(Debug, Default)]
pub struct SceneMirror {
    ship: Option<ShapeHandle>,
    shield: Option<ShapeHandle>,
    entities: HashMap<u32, ShapeHandle>,
}

impl SceneMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the rendered scene with a snapshot.
    pub fn apply<R: ShapeRenderer>(&mut self, snapshot: &GameStateSnapshot, renderer: &mut R) {
        self.apply_ship(snapshot, renderer);

        let mut seen: HashSet<u32> = HashSet::new();

        for bullet in &snapshot.bullets {
            seen.insert(bullet.render_id);
            let handle = *self.entities.entry(bullet.render_id).or_insert_with(|| {
                renderer.create_shape(ShapeKind::Lines, &bullet_points(), Color::WHITE)
            });
            renderer.set_position(handle, bullet.position.x, bullet.position.y);
            renderer.set_rotation(handle, bullet.rotation);
        }

        for asteroid in &snapshot.asteroids {
            seen.insert(asteroid.render_id);
            let handle = *self.entities.entry(asteroid.render_id).or_insert_with(|| {
                renderer.create_shape(ShapeKind::Loop, &asteroid.shape, Color::GREY)
            });
            renderer.set_position(handle, asteroid.position.x, asteroid.position.y);
            renderer.set_rotation(handle, asteroid.rotation);
        }

        for fragment in &snapshot.fragments {
            seen.insert(fragment.render_id);
            let handle = *self.entities.entry(fragment.render_id).or_insert_with(|| {
                renderer.create_shape(
                    ShapeKind::Lines,
                    &fragment_points(fragment.length),
                    Color::WHITE,
                )
            });
            renderer.set_position(handle, fragment.position.x, fragment.position.y);
            renderer.set_rotation(handle, fragment.rotation);
        }

        self.entities.retain(|render_id, handle| {
            if seen.contains(render_id) {
                true
            } else {
                renderer.destroy(*handle);
                false
            }
        });
    }

    fn apply_ship<R: ShapeRenderer>(&mut self, snapshot: &GameStateSnapshot, renderer: &mut R) {
        match &snapshot.ship {
            Some(view) => {
                let ship = *self.ship.get_or_insert_with(|| {
                    renderer.create_shape(ShapeKind::Loop, &ship_points(), Color::WHITE)
                });
                renderer.set_position(ship, view.position.x, view.position.y);
                renderer.set_rotation(ship, view.rotation);

                let shield = *self.shield.get_or_insert_with(|| {
                    renderer.create_shape(ShapeKind::Loop, &shield_points(), Color::WHITE)
                });
                renderer.set_position(shield, view.position.x, view.position.y);
                renderer.set_visible(shield, view.shield_visible);
            }
            None => {
                if let Some(handle) = self.ship.take() {
                    renderer.destroy(handle);
                }
                if let Some(handle) = self.shield.take() {
                    renderer.destroy(handle);
                }
            }
        }
    }
}

/// Ship outline in model space, nose along +X.
fn ship_points() -> Vec<Position> {
    vec![
        Position::new(1.5 * SHIP_RADIUS, 0.0),
        Position::new(-SHIP_RADIUS, 0.9 * SHIP_RADIUS),
        Position::new(-SHIP_RADIUS, -0.9 * SHIP_RADIUS),
    ]
}

/// Shield ring: a 16-gon around the ship.
fn shield_points() -> Vec<Position> {
    let radius = 2.0 * SHIP_RADIUS;
    (0..16)
        .map(|i| {
            let angle = (i as f64 / 16.0) * std::f64::consts::TAU;
            Position::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Short pulse along the direction of travel.
fn bullet_points() -> Vec<Position> {
    vec![Position::new(0.0, 0.0), Position::new(0.7, 0.0)]
}

fn fragment_points(length: f64) -> Vec<Position> {
    vec![
        Position::new(-length / 2.0, 0.0),
        Position::new(length / 2.0, 0.0),
    ]
}
