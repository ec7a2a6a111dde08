//! Game loop thread — runs the simulation at 60Hz and emits snapshots.
//!
//! The engine is created inside the thread so it owns all sim state.
//! Commands arrive via `mpsc`. Each frame emits two events: the full
//! snapshot for HUD/state consumers and a render batch produced by the
//! scene mirror for the display windows. Telemetry goes to the log sink,
//! fire-and-forget.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tauri::{AppHandle, Emitter};

use vectoroids_core::config::SimConfig;
use vectoroids_core::constants::TICK_RATE;
use vectoroids_core::events::TelemetrySink;
use vectoroids_core::state::GameStateSnapshot;
use vectoroids_sim::engine::GameEngine;

use crate::scene::{BatchRenderer, SceneMirror};
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Telemetry sink that forwards to the log facade. Never blocks.
struct LogSink;

impl TelemetrySink for LogSink {
    fn send(&self, message: &str) {
        log::info!("{message}");
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the IPC layer to use.
pub fn spawn_game_loop(
    app_handle: AppHandle,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> mpsc::Sender<GameLoopCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("vectoroids-game-loop".into())
        .spawn(move || {
            run_game_loop(app_handle, cmd_rx, &latest_snapshot);
        })
        .expect("Failed to spawn game loop thread");

    cmd_tx
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    app_handle: AppHandle,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = match GameEngine::new(SimConfig::default()) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("invalid simulation config: {err}");
            return;
        }
    };
    let mut mirror = SceneMirror::new();
    let mut renderer = BatchRenderer::new();
    let sink = LogSink;

    let mut next_tick_time = Instant::now();
    let mut last_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick with the measured wall-clock delta
        //    (pause semantics and wall-clock timers live in the engine)
        let now = Instant::now();
        let wall_dt = now.duration_since(last_tick_time).as_secs_f64();
        last_tick_time = now;
        let snapshot = engine.tick(wall_dt);

        // 3. Forward telemetry to the sink; failure never propagates
        for event in &snapshot.telemetry {
            sink.send(&event.describe());
        }

        // 4. Mirror the snapshot into renderer calls and emit both events
        mirror.apply(&snapshot, &mut renderer);
        let batch = renderer.take_batch();
        if !batch.is_empty() {
            let _ = app_handle.emit("render:batch", &batch);
        }
        let _ = app_handle.emit("game:state_snapshot", &snapshot);

        // 5. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 6. Sleep until the next tick boundary
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectoroids_core::commands::PlayerCommand;
    use vectoroids_core::constants::DT;
    use vectoroids_core::enums::GamePhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartGame)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.667ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_pause_resume_via_commands() {
        let mut engine = GameEngine::new(SimConfig::default()).unwrap();

        engine.queue_command(PlayerCommand::StartGame);
        let snap = engine.tick(DT);
        assert_eq!(snap.phase, GamePhase::Active);

        engine.queue_command(PlayerCommand::Pause);
        let snap = engine.tick(DT);
        assert_eq!(snap.phase, GamePhase::Paused);
        let paused_tick = snap.time.tick;

        // Tick while paused — simulation time should not advance
        let snap = engine.tick(DT);
        assert_eq!(snap.time.tick, paused_tick);

        engine.queue_command(PlayerCommand::Resume);
        let snap = engine.tick(DT);
        assert_eq!(snap.phase, GamePhase::Active);
        assert!(snap.time.tick > paused_tick);
    }

    #[test]
    fn test_snapshot_serialization_is_fast() {
        let mut engine = GameEngine::new(SimConfig::default()).unwrap();
        engine.queue_command(PlayerCommand::StartGame);

        // Run enough ticks to populate entities
        for _ in 0..120 {
            engine.tick(DT);
        }

        let snapshot = engine.tick(DT);
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }
}
