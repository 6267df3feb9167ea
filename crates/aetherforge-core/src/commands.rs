//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. A command
//! whose preconditions fail is a no-op and leaves state unchanged.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::GridCell;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Run control ---
    /// Start a new run, fully resetting all entities and counters.
    StartRun { map: MapId, difficulty: Difficulty },
    /// Toggle active play. After game over this returns to the menu.
    TogglePause,
    /// Abandon the run and return to the menu.
    ExitToMenu,

    // --- Construction ---
    /// Build a tower on a grid cell. An occupied cell selects its tower instead.
    PlaceTower { kind: TowerType, cell: GridCell },
    /// Select a tower for inspection, or clear the selection.
    SelectTower { tower_id: Option<u32> },
    /// Raise a tower's level by one.
    UpgradeTower { tower_id: u32 },
    /// Permanently assign an element to a tower.
    InfuseTower { tower_id: u32, element: Element },
    /// Buy a support module for a tower.
    InstallModule { tower_id: u32, module: ModuleId },

    // --- Abilities ---
    /// Spend mana on an instant ability.
    UseAbility { ability: Ability },

    // --- Advice ---
    /// Ask the advice service for strategic text.
    RequestAdvice,
}
