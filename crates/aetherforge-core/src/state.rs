//! The game state aggregate, exposed to the host after every tick.

use serde::{Deserialize, Serialize};

use crate::components::{Enemy, Particle, Projectile, Tower};
use crate::constants::*;
use crate::enums::*;
use crate::events::SimEvent;
use crate::types::SimTime;

/// Advice text shown before the first answer arrives.
pub const ADVICE_PLACEHOLDER: &str = "Aetherlink Establishing...";

/// Complete simulation state. Owns every live entity container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub time: SimTime,
    pub phase: GamePhase,
    pub map: MapId,
    pub difficulty: Difficulty,

    // --- Economy ---
    pub money: f64,
    pub lives: u32,
    pub mana: f32,
    pub max_mana: f32,
    pub soul_essence: u32,

    // --- Run flow ---
    pub wave: u32,
    pub is_playing: bool,
    pub is_game_over: bool,
    /// Frames since the last spawn of the current wave.
    pub spawn_timer: u32,
    /// Enemies spawned so far in the current wave.
    pub spawned_in_wave: u32,

    // --- Entities (insertion order is iteration order) ---
    pub towers: Vec<Tower>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub selected_tower: Option<u32>,

    // --- Director narrative ---
    pub adaptation: Option<String>,
    pub active_event: Option<String>,
    pub location_power_unlocked: bool,

    // --- Weather ---
    pub weather: WeatherType,
    pub weather_timer: u32,

    // --- Advice ---
    pub advice: String,
    pub advice_pending: bool,

    /// Events raised during the last tick.
    pub events: Vec<SimEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            time: SimTime::default(),
            phase: GamePhase::Menu,
            map: MapId::default(),
            difficulty: Difficulty::default(),
            money: INITIAL_MONEY,
            lives: INITIAL_LIVES,
            mana: INITIAL_MANA,
            max_mana: MAX_MANA,
            soul_essence: 0,
            wave: 1,
            is_playing: false,
            is_game_over: false,
            spawn_timer: 0,
            spawned_in_wave: 0,
            towers: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            selected_tower: None,
            adaptation: None,
            active_event: None,
            location_power_unlocked: false,
            weather: WeatherType::Clear,
            weather_timer: 0,
            advice: ADVICE_PLACEHOLDER.to_string(),
            advice_pending: false,
            events: Vec::new(),
        }
    }
}

impl GameState {
    /// Fresh state for a new run on `map` at `difficulty`.
    pub fn new_run(map: MapId, difficulty: Difficulty, start_mana_bonus: f32) -> Self {
        Self {
            phase: GamePhase::Playing,
            map,
            difficulty,
            mana: INITIAL_MANA + start_mana_bonus,
            ..Self::default()
        }
    }

    pub fn tower(&self, id: u32) -> Option<&Tower> {
        self.towers.iter().find(|t| t.id == id)
    }

    pub fn tower_mut(&mut self, id: u32) -> Option<&mut Tower> {
        self.towers.iter_mut().find(|t| t.id == id)
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Number of towers of `kind` already built.
    pub fn tower_count(&self, kind: TowerType) -> usize {
        self.towers.iter().filter(|t| t.kind == kind).count()
    }

    /// Whether the simulation should do per-frame work at all.
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Playing && !self.is_game_over
    }
}
