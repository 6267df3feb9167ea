//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the game state, processes player commands, runs
//! all systems, and hands the host a snapshot after every tick. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use aetherforge_advisor::service::FALLBACK_OFFLINE;
use aetherforge_advisor::{AdviceRequest, Advisor};
use aetherforge_core::commands::PlayerCommand;
use aetherforge_core::config::GameConfig;
use aetherforge_core::constants::{LOCATION_POWER_WAVE, MANA_REGEN};
use aetherforge_core::enums::GamePhase;
use aetherforge_core::events::SimEvent;
use aetherforge_core::state::GameState;
use aetherforge_director::generate_wave;

use crate::commands::{self, CommandRejection};
use crate::economy;
use crate::systems::{self, EntityIds};

/// Configuration for a simulation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and commands, same simulation.
    pub seed: u64,
    /// Static archetype, map and economy tables.
    #[serde(default)]
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the game state and all sim resources.
#[derive(Debug)]
pub struct SimulationEngine {
    state: GameState,
    config: GameConfig,
    rng: ChaCha8Rng,
    ids: EntityIds,
    command_queue: VecDeque<PlayerCommand>,
    advisor: Option<Advisor>,
}

impl SimulationEngine {
    /// Create an engine without an advice service. Advice requests resolve
    /// to the offline fallback immediately.
    pub fn new(config: SimConfig) -> Self {
        Self {
            state: GameState::default(),
            config: config.game,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            ids: EntityIds::default(),
            command_queue: VecDeque::new(),
            advisor: None,
        }
    }

    /// Create an engine that consults `advisor` on wave clears and manual
    /// requests.
    pub fn with_advisor(config: SimConfig, advisor: Advisor) -> Self {
        Self {
            advisor: Some(advisor),
            ..Self::new(config)
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame and return the resulting state.
    pub fn tick(&mut self) -> GameState {
        self.state.events.clear();
        self.process_commands();

        let active = self.state.is_active();
        self.state
            .time
            .advance(active && self.state.is_playing);
        if active {
            if self.state.is_playing {
                self.run_systems();
            }
            systems::particles::run(&mut self.state.particles);
        }
        self.poll_advisor();

        self.state.clone()
    }

    /// Current state, without advancing.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current state as JSON.
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.state)
    }

    /// Mutable state access for test setup.
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Process all queued commands. Rejections are logged and dropped.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(rejection) = self.handle_command(&command) {
                tracing::debug!(?command, %rejection, "command rejected");
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: &PlayerCommand) -> Result<(), CommandRejection> {
        let state = &mut self.state;
        let config = &self.config;
        match *command {
            PlayerCommand::StartRun { map, difficulty } => {
                let map_spec = config
                    .map(map)
                    .ok_or_else(|| CommandRejection::MissingConfig(format!("map {map:?}")))?;
                if config.difficulty(difficulty).is_none() {
                    return Err(CommandRejection::MissingConfig(format!(
                        "difficulty {difficulty:?}"
                    )));
                }
                *state = GameState::new_run(map, difficulty, map_spec.start_mana_bonus);
                state.events.push(SimEvent::RunStarted { map, difficulty });
                self.ids = EntityIds::default();
                tracing::info!(?map, ?difficulty, "run started");
            }
            PlayerCommand::TogglePause => match state.phase {
                GamePhase::Defeat => state.phase = GamePhase::Menu,
                GamePhase::Playing => state.is_playing = !state.is_playing,
                GamePhase::Menu => return Err(CommandRejection::NoActiveRun),
            },
            PlayerCommand::ExitToMenu => {
                state.phase = GamePhase::Menu;
                state.is_playing = false;
            }
            PlayerCommand::PlaceTower { kind, cell } => {
                commands::place_tower(state, config, &mut self.ids, &mut self.rng, kind, cell)?;
            }
            PlayerCommand::SelectTower { tower_id } => {
                commands::select_tower(state, tower_id)?;
            }
            PlayerCommand::UpgradeTower { tower_id } => {
                commands::upgrade_tower(state, config, tower_id)?;
            }
            PlayerCommand::InfuseTower { tower_id, element } => {
                commands::infuse_tower(state, config, tower_id, element)?;
            }
            PlayerCommand::InstallModule { tower_id, module } => {
                commands::install_module(state, config, tower_id, module)?;
            }
            PlayerCommand::UseAbility { ability } => {
                commands::use_ability(state, config, &mut self.ids, &mut self.rng, ability)?;
            }
            PlayerCommand::RequestAdvice => {
                if state.phase == GamePhase::Menu {
                    return Err(CommandRejection::NoActiveRun);
                }
                request_advice(self.advisor.as_mut(), state, config);
            }
        }
        Ok(())
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let state = &mut self.state;
        let config = &self.config;

        // 1. Mana regeneration and the location power
        state.mana = (state.mana + MANA_REGEN).min(state.max_mana);
        if state.wave >= LOCATION_POWER_WAVE && !state.location_power_unlocked {
            state.location_power_unlocked = true;
            state.events.push(SimEvent::LocationPowerUnlocked { map: state.map });
            tracing::info!(map = ?state.map, "location power unlocked");
        }

        // 2. Weather
        systems::weather::run(state, &mut self.rng);

        // 3. Director (recomputed every frame)
        let plan = generate_wave(state.wave, state.difficulty, &state.towers, config);
        if state.adaptation.as_deref() != Some(plan.adaptation.as_str()) {
            tracing::debug!(
                wave = state.wave,
                adaptation = %plan.adaptation,
                enemies = plan.total_count(),
                "wave composition changed"
            );
            state.adaptation = Some(plan.adaptation.clone());
        }
        if state.active_event.as_deref() != plan.event_label() {
            state.active_event = plan.event_label().map(str::to_string);
        }

        // 4. Spawning, or wave completion once the field is clear
        let spawning = systems::spawner::run(state, &plan, config, &mut self.ids, &mut self.rng);
        if !spawning && state.enemies.is_empty() {
            economy::complete_wave(state, config);
            request_advice(self.advisor.as_mut(), state, config);
        }

        // 5. Enemy movement, leaks and deaths
        systems::enemies::run(state, config, &mut self.ids, &mut self.rng);
        // 6. Tower attacks
        systems::towers::run(state, config, &mut self.ids, &mut self.rng);
        // 7. Projectile resolution
        systems::projectiles::run(state, config, &mut self.ids, &mut self.rng);
        // 8. Deaths caused by projectiles
        systems::enemies::cull_dead(state, config, &mut self.ids, &mut self.rng);
    }

    fn poll_advisor(&mut self) {
        if let Some(advisor) = self.advisor.as_mut() {
            if let Some(text) = advisor.poll() {
                self.state.advice = text;
            }
            self.state.advice_pending = advisor.in_flight() > 0;
        }
    }
}

/// Fire off an advice request. Never blocks the frame.
fn request_advice(advisor: Option<&mut Advisor>, state: &mut GameState, config: &GameConfig) {
    let sent = advisor.is_some_and(|a| a.request(AdviceRequest::from_state(state, config)));
    if sent {
        state.advice_pending = true;
    } else {
        state.advice = FALLBACK_OFFLINE.to_string();
    }
}
