//! Vectoroids Tauri application.
//!
//! This crate wires the headless simulation to the frontend: a 60Hz
//! game loop thread, IPC command handlers, and the scene mirror that
//! diffs snapshots into renderer-adapter calls batched over IPC.

pub mod game_loop;
pub mod ipc;
pub mod scene;
pub mod state;

pub use vectoroids_core as core;
