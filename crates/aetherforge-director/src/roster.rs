//! Roster analysis.
//!
//! Aggregates the damage potential of the player's towers and classifies
//! the defense so the composer can pick a counter.

use serde::Serialize;

use aetherforge_core::components::Tower;
use aetherforge_core::config::GameConfig;
use aetherforge_core::enums::TowerType;

/// Dominant damage category of a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DamageProfile {
    MagicHeavy,
    PhysicalHeavy,
    Balanced,
}

/// One side must exceed the other by this factor to dominate.
const DOMINANCE_FACTOR: f32 = 1.5;

/// Share of area-capable towers above which the roster counts as area-heavy.
const AREA_HEAVY_SHARE: f32 = 0.4;

/// Summed base damage potential of a roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RosterAnalysis {
    pub total_damage: f32,
    pub magic_damage: f32,
    pub physical_damage: f32,
    pub area_capable: usize,
    pub tower_count: usize,
}

impl RosterAnalysis {
    /// Sum base archetype damage over `towers`. Levels are ignored.
    pub fn analyze(towers: &[Tower], config: &GameConfig) -> Self {
        let mut analysis = Self {
            tower_count: towers.len(),
            ..Self::default()
        };
        for tower in towers {
            let damage = config.tower(tower.kind).map_or(0.0, |spec| spec.damage);
            analysis.total_damage += damage;
            if is_magic(tower) {
                analysis.magic_damage += damage;
            } else {
                analysis.physical_damage += damage;
            }
            if tower.kind.is_area_capable() {
                analysis.area_capable += 1;
            }
        }
        analysis
    }

    pub fn profile(&self) -> DamageProfile {
        // Physical dominance is checked first.
        if self.physical_damage > self.magic_damage * DOMINANCE_FACTOR {
            DamageProfile::PhysicalHeavy
        } else if self.magic_damage > self.physical_damage * DOMINANCE_FACTOR {
            DamageProfile::MagicHeavy
        } else {
            DamageProfile::Balanced
        }
    }

    pub fn is_area_heavy(&self) -> bool {
        self.area_capable as f32 > self.tower_count as f32 * AREA_HEAVY_SHARE
    }
}

/// A tower deals magic damage if it is a Sentinel or carries any infusion.
fn is_magic(tower: &Tower) -> bool {
    tower.kind == TowerType::Sentinel || tower.infusion.is_some()
}
