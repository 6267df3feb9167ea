//! Scripted session driver.
//!
//! [`Autopilot`] looks at a snapshot and answers with the commands a
//! cautious player would issue: start the run, build along the path,
//! upgrade once the build plan is complete, repair when lives run low and
//! resume play after every wave clear. It drives both the headless
//! [`run_headless`] session and the real-time host.

use serde::Serialize;

use aetherforge_core::commands::PlayerCommand;
use aetherforge_core::config::GameConfig;
use aetherforge_core::constants::{GRID_COLS, GRID_ROWS, MAX_TOWER_LEVEL, REPAIR_COST};
use aetherforge_core::enums::{Ability, Difficulty, GamePhase, MapId, TowerType};
use aetherforge_core::events::SimEvent;
use aetherforge_core::state::GameState;
use aetherforge_core::types::GridCell;
use aetherforge_sim::economy;
use aetherforge_sim::engine::SimulationEngine;

/// Archetypes built in rotation.
const BUILD_ORDER: [TowerType; 4] = [
    TowerType::Cannon,
    TowerType::Tesla,
    TowerType::Sentinel,
    TowerType::Resonator,
];

const REPAIR_BELOW: u32 = 8;

/// Rule-based player.
#[derive(Debug, Clone)]
pub struct Autopilot {
    map: MapId,
    difficulty: Difficulty,
    config: GameConfig,
    /// Off-path cells touching the path, in scan order.
    sites: Vec<GridCell>,
    max_towers: usize,
    started: bool,
}

impl Autopilot {
    pub fn new(map: MapId, difficulty: Difficulty, config: GameConfig, max_towers: usize) -> Self {
        let sites = build_sites(&config, map);
        Self {
            map,
            difficulty,
            config,
            sites,
            max_towers,
            started: false,
        }
    }

    /// Commands for the next frame, given the latest snapshot.
    pub fn decide(&mut self, state: &GameState) -> Vec<PlayerCommand> {
        if !self.started {
            self.started = true;
            return vec![PlayerCommand::StartRun {
                map: self.map,
                difficulty: self.difficulty,
            }];
        }
        if state.phase != GamePhase::Playing || state.is_game_over {
            return Vec::new();
        }

        let mut commands = Vec::new();
        if let Some(build) = self.next_build(state) {
            commands.push(build);
        } else if let Some(upgrade) = self.next_upgrade(state) {
            commands.push(upgrade);
        }
        if state.lives < REPAIR_BELOW && state.mana >= REPAIR_COST {
            commands.push(PlayerCommand::UseAbility {
                ability: Ability::Repair,
            });
        }
        if !state.is_playing {
            commands.push(PlayerCommand::TogglePause);
        }
        commands
    }

    fn next_build(&self, state: &GameState) -> Option<PlayerCommand> {
        if state.towers.len() >= self.max_towers {
            return None;
        }
        let kind = BUILD_ORDER[state.towers.len() % BUILD_ORDER.len()];
        let spec = self.config.tower(kind)?;
        let cost_mod = self.config.difficulty(state.difficulty)?.cost_mod;
        if state.money < economy::tower_price(spec, cost_mod, state.tower_count(kind)) {
            return None;
        }
        let cell = self
            .sites
            .iter()
            .copied()
            .find(|cell| state.towers.iter().all(|t| t.cell != *cell))?;
        Some(PlayerCommand::PlaceTower { kind, cell })
    }

    fn next_upgrade(&self, state: &GameState) -> Option<PlayerCommand> {
        let tower = state
            .towers
            .iter()
            .filter(|t| t.level < MAX_TOWER_LEVEL)
            .min_by_key(|t| t.level)?;
        let spec = self.config.tower(tower.kind)?;
        let price = economy::upgrade_price(spec, tower.level, &self.config)?;
        (state.money >= price).then_some(PlayerCommand::UpgradeTower { tower_id: tower.id })
    }
}

fn build_sites(config: &GameConfig, map: MapId) -> Vec<GridCell> {
    let Some(spec) = config.map(map) else {
        return Vec::new();
    };
    let mut sites = Vec::new();
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let cell = GridCell::new(col, row);
            if spec.is_path_cell(cell) {
                continue;
            }
            let touches_path = [(-1, 0), (1, 0), (0, -1), (0, 1)]
                .iter()
                .any(|(dc, dr)| spec.is_path_cell(GridCell::new(col + dc, row + dr)));
            if touches_path {
                sites.push(cell);
            }
        }
    }
    sites
}

/// Outcome of a scripted session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub frames: u64,
    pub wave: u32,
    pub lives: u32,
    pub money: f64,
    pub towers: usize,
    pub kills: u32,
    pub leaks: u32,
    pub game_over: bool,
    pub advice: String,
}

impl SessionSummary {
    /// Fold one frame's snapshot into the running totals.
    pub fn observe(&mut self, state: &GameState) {
        self.frames += 1;
        for event in &state.events {
            match event {
                SimEvent::EnemyKilled { .. } => self.kills += 1,
                SimEvent::EnemyLeaked { .. } => self.leaks += 1,
                SimEvent::WaveCleared { wave, .. } => {
                    tracing::info!(wave, money = state.money, lives = state.lives, "wave survived");
                }
                _ => {}
            }
        }
        self.wave = state.wave;
        self.lives = state.lives;
        self.money = state.money;
        self.towers = state.towers.len();
        self.game_over = state.is_game_over;
        self.advice.clone_from(&state.advice);
    }
}

/// Drive `engine` for `frames` frames as fast as possible. Stops early on
/// game over.
pub fn run_headless(
    engine: &mut SimulationEngine,
    autopilot: &mut Autopilot,
    frames: u64,
) -> SessionSummary {
    let mut summary = SessionSummary::default();
    for _ in 0..frames {
        let commands = autopilot.decide(engine.state());
        engine.queue_commands(commands);
        let state = engine.tick();
        summary.observe(&state);
        if state.is_game_over {
            tracing::info!(wave = state.wave, "session ended in defeat");
            break;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use aetherforge_sim::engine::SimConfig;

    #[test]
    fn test_build_sites_avoid_the_path() {
        let config = GameConfig::default();
        let sites = build_sites(&config, MapId::Etherfields);
        let map = config.map(MapId::Etherfields).unwrap();
        assert!(!sites.is_empty());
        assert!(sites.iter().all(|c| c.in_bounds() && !map.is_path_cell(*c)));
        assert!(sites.contains(&GridCell::new(3, 5)), "cell beside the first leg");
    }

    #[test]
    fn test_autopilot_starts_then_resumes() {
        let mut pilot = Autopilot::new(MapId::Xeros, Difficulty::Master, GameConfig::default(), 0);
        let menu = GameState::default();
        assert_eq!(
            pilot.decide(&menu),
            vec![PlayerCommand::StartRun {
                map: MapId::Xeros,
                difficulty: Difficulty::Master
            }]
        );
        assert!(pilot.decide(&menu).is_empty(), "waits in the menu");

        let paused = GameState::new_run(MapId::Xeros, Difficulty::Master, 0.0);
        assert_eq!(pilot.decide(&paused), vec![PlayerCommand::TogglePause]);
    }

    #[test]
    fn test_headless_session_clears_first_wave() {
        let config = SimConfig {
            seed: 7,
            ..Default::default()
        };
        let mut pilot = Autopilot::new(
            MapId::Etherfields,
            Difficulty::Engineer,
            config.game.clone(),
            4,
        );
        let mut engine = SimulationEngine::new(config);

        let summary = run_headless(&mut engine, &mut pilot, 4000);

        assert!(summary.wave >= 2, "wave {} never cleared", summary.wave);
        assert!(summary.towers > 0);
        assert!(summary.kills > 0, "the defenses never scored");
        assert!(!summary.game_over);
        assert_eq!(summary.frames, 4000);
    }
}
