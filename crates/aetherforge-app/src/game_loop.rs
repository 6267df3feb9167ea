//! Game loop thread: runs the simulation engine at 60 Hz and publishes
//! snapshots.
//!
//! The engine is created inside this thread so the thread owns it outright.
//! Commands arrive via an `mpsc` channel. The latest snapshot is stored in
//! shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use aetherforge_advisor::Advisor;
use aetherforge_core::commands::PlayerCommand;
use aetherforge_core::constants::FPS;
use aetherforge_core::events::SimEvent;
use aetherforge_core::state::GameState;
use aetherforge_sim::engine::{SimConfig, SimulationEngine};

/// Nominal duration of one frame.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);

/// Messages into the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Spawn the game loop in a new thread and return its command sender.
pub fn spawn_game_loop(
    config: SimConfig,
    advisor: Option<Advisor>,
    latest_snapshot: Arc<Mutex<Option<GameState>>>,
) -> std::io::Result<mpsc::Sender<GameLoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("aetherforge-game-loop".into())
        .spawn(move || {
            let engine = match advisor {
                Some(advisor) => SimulationEngine::with_advisor(config, advisor),
                None => SimulationEngine::new(config),
            };
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok(cmd_tx)
}

/// The game loop. Runs until a Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameState>>,
) {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::debug!(frame = engine.state().time.frame, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame (the engine handles pause semantics)
        let snapshot = engine.tick();
        log_events(&snapshot.events);

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next frame
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

fn log_events(events: &[SimEvent]) {
    for event in events {
        match event {
            SimEvent::EnemyKilled { .. } | SimEvent::EnemyLeaked { .. } => {
                tracing::trace!(?event, "sim event");
            }
            _ => tracing::debug!(?event, "sim event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aetherforge_core::enums::{Difficulty, GamePhase, MapId};

    fn start() -> PlayerCommand {
        PlayerCommand::StartRun {
            map: MapId::Etherfields,
            difficulty: Difficulty::Engineer,
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(start())).unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::TogglePause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartRun { .. })
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::TogglePause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_snapshot_serializes_populated_frame() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_commands([start(), PlayerCommand::TogglePause]);

        // Run enough frames to populate entities
        for _ in 0..400 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let json = serde_json::to_string(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        for key in ["enemies", "towers", "projectiles", "particles", "time", "wave"] {
            assert!(value.get(key).is_some(), "snapshot is missing {key}");
        }
        assert_eq!(
            value["enemies"].as_array().map(Vec::len),
            Some(snapshot.enemies.len())
        );
        assert_eq!(value["time"]["frame"], snapshot.time.frame);
    }

    #[test]
    fn test_pause_resume_via_commands() {
        let mut engine = SimulationEngine::new(SimConfig::default());

        engine.queue_command(start());
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert!(!snap.is_playing);
        let paused_frame = snap.time.active_frames;

        // Tick while paused: active time should not advance
        let snap = engine.tick();
        assert_eq!(snap.time.active_frames, paused_frame);

        engine.queue_command(PlayerCommand::TogglePause);
        let snap = engine.tick();
        assert!(snap.is_playing);
        assert!(snap.time.active_frames > paused_frame);
    }

    #[test]
    fn test_loop_publishes_and_stops() {
        let latest = Arc::new(Mutex::new(None));
        let tx = spawn_game_loop(SimConfig::default(), None, latest.clone()).unwrap();
        tx.send(GameLoopCommand::PlayerCommand(start())).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let phase = latest.lock().unwrap().as_ref().map(|s: &GameState| s.phase);
            if phase == Some(GamePhase::Playing) {
                break;
            }
            assert!(Instant::now() < deadline, "loop never published a run");
            std::thread::sleep(Duration::from_millis(5));
        }

        tx.send(GameLoopCommand::Shutdown).unwrap();
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
