//! Control surface over the game loop thread.
//!
//! A front end (or the CLI) starts the loop once, forwards player commands
//! through the channel and polls the latest snapshot.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use aetherforge_advisor::Advisor;
use aetherforge_core::commands::PlayerCommand;
use aetherforge_core::state::GameState;
use aetherforge_sim::engine::SimConfig;

use crate::game_loop::{self, GameLoopCommand};

/// Shared handles to the game loop thread. The loop is running exactly while
/// a command sender is held.
#[derive(Debug, Default)]
pub struct AppState {
    pub command_tx: Mutex<Option<Sender<GameLoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<GameState>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> Result<bool, HostError> {
        Ok(self.command_tx.lock()?.is_some())
    }
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has stopped")]
    Disconnected,
    #[error("host state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop: {0}")]
    Spawn(#[from] std::io::Error),
}

impl<T> From<PoisonError<T>> for HostError {
    fn from(_: PoisonError<T>) -> Self {
        HostError::Poisoned
    }
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(
    state: &AppState,
    config: SimConfig,
    advisor: Option<Advisor>,
) -> Result<(), HostError> {
    let mut command_tx = state.command_tx.lock()?;
    if command_tx.is_some() {
        return Err(HostError::AlreadyRunning);
    }

    *command_tx = Some(game_loop::spawn_game_loop(
        config,
        advisor,
        state.latest_snapshot.clone(),
    )?);
    tracing::info!("game loop started");
    Ok(())
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), HostError> {
    let tx = state.command_tx.lock()?;
    tx.as_ref()
        .ok_or(HostError::NotStarted)?
        .send(GameLoopCommand::PlayerCommand(command))
        .map_err(|_| HostError::Disconnected)
}

/// Latest snapshot, if the loop has completed a frame.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameState>, HostError> {
    Ok(state.latest_snapshot.lock()?.clone())
}

/// Stop the game loop. Stopping a stopped host is a no-op.
pub fn stop_simulation(state: &AppState) -> Result<(), HostError> {
    if let Some(tx) = state.command_tx.lock()?.take() {
        // A loop that already exited has dropped its receiver.
        let _ = tx.send(GameLoopCommand::Shutdown);
        tracing::info!("game loop stopping");
    }
    Ok(())
}
