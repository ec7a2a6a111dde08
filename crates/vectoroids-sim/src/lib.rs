//! Headless simulation engine for Vectoroids.
//!
//! `GameEngine` owns the hecs ECS world, processes player commands,
//! runs the per-tick system pipeline, and produces `GameStateSnapshot`s.
//! No Tauri or renderer dependency, enabling deterministic testing.

pub mod engine;
pub mod scheduler;
pub mod spawner;
pub mod systems;

#[cfg(test)]
mod tests;
