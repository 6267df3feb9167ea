//! Entity records owned by the game state.
//!
//! Records are plain data. Game logic lives in the simulation systems,
//! apart from a few read-only accessors.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{GridCell, Position};

/// A placed tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub id: u32,
    pub kind: TowerType,
    pub cell: GridCell,
    /// Cell center in world units.
    pub position: Position,
    /// Frames until the next attack. Attacks fire at zero.
    pub cooldown: f32,
    /// 1..=3.
    pub level: u8,
    /// Set once at most, never changed afterwards.
    pub infusion: Option<Element>,
    /// At most two, no duplicates.
    pub modules: Vec<ModuleId>,
    pub ability_cooldown: u32,
    /// Remaining malfunction frames, if the tower is malfunctioning.
    pub malfunction: Option<u32>,
}

impl Tower {
    pub fn has_module(&self, module: ModuleId) -> bool {
        self.modules.contains(&module)
    }

    /// Element the tower currently attacks with.
    pub fn element(&self) -> Element {
        self.infusion.unwrap_or_else(|| self.kind.native_element())
    }
}

/// A stacking status effect on an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub element: Element,
    /// Remaining frames.
    pub duration: u32,
    pub magnitude: f32,
}

/// A live enemy walking one of the map's paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyType,
    pub position: Position,
    pub health: f32,
    pub max_health: f32,
    /// Effective speed this frame (units per frame).
    pub speed: f32,
    pub base_speed: f32,
    /// Index of the last waypoint reached. The enemy walks toward the next one.
    pub path_index: usize,
    /// Which of the map's paths the enemy follows.
    pub path_id: usize,
    pub bounty: f64,
    pub armor_class: ArmorClass,
    /// Numeric armor, shredded by acid rain. Display only.
    pub armor: f32,
    pub ethereal: bool,
    pub effects: Vec<StatusEffect>,
}

impl Enemy {
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// A projectile in flight or awaiting same-frame resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub position: Position,
    /// Weak reference into the enemy container. The target may be gone.
    pub target_id: u32,
    pub damage: f32,
    /// Units per frame. Instant kinds carry a sentinel value.
    pub speed: f32,
    pub element: Element,
    pub kind: ProjectileKind,
    /// Remaining relays, CHAIN only.
    pub chain_remaining: Option<u32>,
    pub color: String,
}

/// Decorative particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub position: Position,
    pub velocity: Position,
    /// Remaining frames.
    pub life: f32,
    pub max_life: f32,
    pub color: String,
    pub size: f32,
}
