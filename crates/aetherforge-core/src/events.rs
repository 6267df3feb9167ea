//! Events emitted by the simulation for presentation feedback.
//!
//! Events are collected during one frame and cleared at the start of the next.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    RunStarted {
        map: MapId,
        difficulty: Difficulty,
    },
    TowerPlaced {
        tower_id: u32,
        kind: TowerType,
        cost: f64,
    },
    TowerUpgraded {
        tower_id: u32,
        level: u8,
        cost: f64,
    },
    TowerInfused {
        tower_id: u32,
        element: Element,
        cost: f64,
    },
    ModuleInstalled {
        tower_id: u32,
        module: ModuleId,
        cost: f64,
    },
    AbilityUsed {
        ability: Ability,
    },
    EnemyKilled {
        enemy_id: u32,
        kind: EnemyType,
        position: Position,
        bounty: f64,
    },
    EnemyLeaked {
        enemy_id: u32,
        kind: EnemyType,
        /// Gold taken on top of the life.
        stolen: f64,
    },
    WaveCleared {
        /// The new wave number.
        wave: u32,
        income: f64,
        interest: f64,
    },
    WeatherChanged {
        weather: WeatherType,
    },
    TowerMalfunction {
        tower_id: u32,
    },
    LocationPowerUnlocked {
        map: MapId,
    },
    GameOver {
        wave: u32,
    },
}
