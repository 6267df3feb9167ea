//! Static configuration tables: tower and enemy archetypes, maps, the
//! difficulty table, the module catalog and upgrade-cost multipliers.
//!
//! The simulation treats these as injected, read-only data.
//! [`GameConfig::default`] carries the built-in tables and
//! [`GameConfig::from_json`] loads and validates an override.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::TILE_SIZE;
use crate::enums::*;
use crate::types::GridCell;

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{table} table is missing an entry for {key}")]
    Missing { table: &'static str, key: String },
    #[error("{table} table has a duplicate entry for {key}")]
    Duplicate { table: &'static str, key: String },
    #[error("map {map:?} path {path} needs at least two waypoints")]
    ShortPath { map: MapId, path: usize },
    #[error("map {map:?} path {path} leaves the grid at {cell:?}")]
    WaypointOutOfBounds {
        map: MapId,
        path: usize,
        cell: GridCell,
    },
    #[error("map {0:?} has no paths")]
    NoPaths(MapId),
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: String, value: f64 },
}

/// Tower archetype stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerSpec {
    pub kind: TowerType,
    pub name: String,
    pub cost: f64,
    /// Base range in grid cells.
    pub range_tiles: f32,
    pub damage: f32,
    /// Frames between attacks.
    pub cooldown: f32,
    pub color: String,
    pub description: String,
    pub allowed_infusions: Vec<Element>,
}

impl TowerSpec {
    /// Base range in world units.
    pub fn range(&self) -> f32 {
        self.range_tiles * TILE_SIZE
    }
}

/// Enemy archetype stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub kind: EnemyType,
    /// Units per frame.
    pub speed: f32,
    pub health: f32,
    pub bounty: f64,
    pub armor: ArmorClass,
    pub color: String,
}

/// Map definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    pub id: MapId,
    pub name: String,
    pub theme: String,
    pub description: String,
    pub modifiers: Vec<String>,
    pub power_name: String,
    pub power_description: String,
    /// Waypoint sequences in grid cells. Enemies pick one at spawn.
    pub paths: Vec<Vec<GridCell>>,
    #[serde(default)]
    pub start_mana_bonus: f32,
}

impl MapSpec {
    /// Whether `cell` lies on any leg of any path.
    pub fn is_path_cell(&self, cell: GridCell) -> bool {
        self.paths
            .iter()
            .flat_map(|path| path.windows(2))
            .any(|leg| leg_contains(leg[0], leg[1], cell))
    }
}

/// Cells covered by the straight leg `a -> b`. Horizontal and vertical legs
/// cover every cell between the endpoints; diagonal legs cover the cells
/// stepped through along the line.
fn leg_contains(a: GridCell, b: GridCell, cell: GridCell) -> bool {
    let (dx, dy) = (b.col - a.col, b.row - a.row);
    if dy == 0 {
        return cell.row == a.row && (a.col.min(b.col)..=a.col.max(b.col)).contains(&cell.col);
    }
    if dx == 0 {
        return cell.col == a.col && (a.row.min(b.row)..=a.row.max(b.row)).contains(&cell.row);
    }
    let steps = dx.abs().max(dy.abs());
    (0..=steps).any(|i| {
        let t = i as f32 / steps as f32;
        let col = (a.col as f32 + dx as f32 * t).round() as i32;
        let row = (a.row as f32 + dy as f32 * t).round() as i32;
        col == cell.col && row == cell.row
    })
}

/// Difficulty multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultySpec {
    pub difficulty: Difficulty,
    /// Enemy health multiplier.
    pub hp_mod: f32,
    /// Bounty and wave-clear gold multiplier.
    pub gold_mod: f64,
    /// Tower placement price multiplier.
    pub cost_mod: f64,
}

/// Purchasable tower module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub id: ModuleId,
    pub name: String,
    pub description: String,
    pub cost: f64,
}

/// Upgrade price multipliers of an archetype's base cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeCosts {
    pub level_2: f64,
    pub level_3: f64,
    pub infusion: f64,
}

impl Default for UpgradeCosts {
    fn default() -> Self {
        Self {
            level_2: 1.8,
            level_3: 3.0,
            infusion: 1.5,
        }
    }
}

/// All static tables consumed by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub towers: Vec<TowerSpec>,
    pub enemies: Vec<EnemySpec>,
    pub maps: Vec<MapSpec>,
    pub difficulties: Vec<DifficultySpec>,
    pub modules: Vec<ModuleSpec>,
    #[serde(default)]
    pub upgrades: UpgradeCosts,
}

impl GameConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn tower(&self, kind: TowerType) -> Option<&TowerSpec> {
        self.towers.iter().find(|t| t.kind == kind)
    }

    pub fn enemy(&self, kind: EnemyType) -> Option<&EnemySpec> {
        self.enemies.iter().find(|e| e.kind == kind)
    }

    pub fn map(&self, id: MapId) -> Option<&MapSpec> {
        self.maps.iter().find(|m| m.id == id)
    }

    pub fn difficulty(&self, difficulty: Difficulty) -> Option<&DifficultySpec> {
        self.difficulties
            .iter()
            .find(|d| d.difficulty == difficulty)
    }

    pub fn module(&self, id: ModuleId) -> Option<&ModuleSpec> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Check table completeness and value sanity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        exactly_once("tower", &TowerType::ALL, self.towers.iter().map(|t| t.kind))?;
        exactly_once("enemy", &EnemyType::ALL, self.enemies.iter().map(|e| e.kind))?;
        exactly_once("map", &MapId::ALL, self.maps.iter().map(|m| m.id))?;
        exactly_once(
            "difficulty",
            &Difficulty::ALL,
            self.difficulties.iter().map(|d| d.difficulty),
        )?;
        exactly_once(
            "module",
            &[ModuleId::Targeting, ModuleId::Overclock, ModuleId::RangeFinder],
            self.modules.iter().map(|m| m.id),
        )?;

        for t in &self.towers {
            positive(format!("{:?} cost", t.kind), t.cost)?;
            positive(format!("{:?} range", t.kind), t.range_tiles as f64)?;
            positive(format!("{:?} cooldown", t.kind), t.cooldown as f64)?;
        }
        for e in &self.enemies {
            positive(format!("{:?} health", e.kind), e.health as f64)?;
            positive(format!("{:?} speed", e.kind), e.speed as f64)?;
        }
        for d in &self.difficulties {
            positive(format!("{:?} hp_mod", d.difficulty), d.hp_mod as f64)?;
            positive(format!("{:?} gold_mod", d.difficulty), d.gold_mod)?;
            positive(format!("{:?} cost_mod", d.difficulty), d.cost_mod)?;
        }
        positive("level 2 upgrade multiplier".into(), self.upgrades.level_2)?;
        positive("level 3 upgrade multiplier".into(), self.upgrades.level_3)?;
        positive("infusion multiplier".into(), self.upgrades.infusion)?;

        for map in &self.maps {
            if map.paths.is_empty() {
                return Err(ConfigError::NoPaths(map.id));
            }
            for (i, path) in map.paths.iter().enumerate() {
                if path.len() < 2 {
                    return Err(ConfigError::ShortPath { map: map.id, path: i });
                }
                if let Some(cell) = path.iter().find(|c| !c.in_bounds()) {
                    return Err(ConfigError::WaypointOutOfBounds {
                        map: map.id,
                        path: i,
                        cell: *cell,
                    });
                }
            }
        }
        Ok(())
    }
}

fn exactly_once<K>(
    table: &'static str,
    expected: &[K],
    present: impl Iterator<Item = K>,
) -> Result<(), ConfigError>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
{
    let mut seen = HashSet::new();
    for key in present {
        if !seen.insert(key) {
            return Err(ConfigError::Duplicate {
                table,
                key: format!("{key:?}"),
            });
        }
    }
    match expected.iter().find(|k| !seen.contains(*k)) {
        Some(key) => Err(ConfigError::Missing {
            table,
            key: format!("{key:?}"),
        }),
        None => Ok(()),
    }
}

fn positive(what: String, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { what, value })
    }
}

// --- Built-in tables ---

#[allow(clippy::too_many_arguments)]
fn tower(
    kind: TowerType,
    name: &str,
    cost: f64,
    range_tiles: f32,
    damage: f32,
    cooldown: f32,
    color: &str,
    description: &str,
    allowed_infusions: [Element; 3],
) -> TowerSpec {
    TowerSpec {
        kind,
        name: name.into(),
        cost,
        range_tiles,
        damage,
        cooldown,
        color: color.into(),
        description: description.into(),
        allowed_infusions: allowed_infusions.to_vec(),
    }
}

fn enemy(kind: EnemyType, speed: f32, health: f32, bounty: f64, armor: ArmorClass, color: &str) -> EnemySpec {
    EnemySpec {
        kind,
        speed,
        health,
        bounty,
        armor,
        color: color.into(),
    }
}

fn cells(points: &[(i32, i32)]) -> Vec<GridCell> {
    points.iter().map(|&(c, r)| GridCell::new(c, r)).collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        use ArmorClass as A;
        use Element as E;
        use EnemyType as N;
        use TowerType as T;

        let towers = vec![
            tower(T::Cannon, "Aether Cannon", 100.0, 3.5, 15.0, 35.0, "#b5a642",
                "Rapid-firing ballistic tower.", [E::Fire, E::Ice, E::Lightning]),
            tower(T::Sentinel, "Arcane Sentinel", 150.0, 6.0, 35.0, 50.0, "#b026ff",
                "Fires homing arcane bolts.", [E::Necrotic, E::Holy, E::Chaos]),
            tower(T::Tesla, "Tesla Spire", 200.0, 3.0, 20.0, 45.0, "#00f3ff",
                "Arcs electricity to nearby enemies.", [E::Water, E::Metal, E::Wind]),
            tower(T::Chrono, "Chrono Spire", 180.0, 4.0, 0.0, 10.0, "#ffffff",
                "Slows enemies in range.", [E::Crystal, E::Void, E::Arcane]),
            tower(T::Golem, "Forge Golem", 250.0, 1.5, 80.0, 60.0, "#cd7f32",
                "Heavy melee damage to close enemies.", [E::Magma, E::Stone, E::Kinetic]),
            tower(T::Resonator, "Symphonic Resonator", 300.0, 3.5, 10.0, 120.0, "#ff4444",
                "Pulses aura damage periodically.", [E::Sonic, E::Poison, E::Fear]),
            tower(T::Beacon, "Prismatic Beacon", 500.0, 7.0, 4.0, 5.0, "#ffd700",
                "Fires a continuous adaptive beam.", [E::Uv, E::Gamma, E::Infrared]),
        ];

        let enemies = vec![
            enemy(N::Scuttler, 2.2, 30.0, 8.0, A::None, "#a0a0a0"),
            enemy(N::Grunt, 1.2, 60.0, 12.0, A::Light, "#8b4513"),
            enemy(N::Thief, 3.0, 25.0, 15.0, A::None, "#ffd700"),
            enemy(N::Brute, 0.7, 200.0, 25.0, A::Heavy, "#4a4a4a"),
            enemy(N::Weaver, 1.5, 80.0, 20.0, A::None, "#e6e6fa"),
            enemy(N::Spreader, 0.9, 120.0, 22.0, A::None, "#006400"),
            enemy(N::Drone, 2.0, 50.0, 18.0, A::Light, "#87ceeb"),
            enemy(N::Leech, 1.8, 70.0, 30.0, A::None, "#9400d3"),
            enemy(N::Siege, 0.5, 400.0, 50.0, A::Fortified, "#2f4f4f"),
            enemy(N::Doppel, 1.3, 60.0, 25.0, A::None, "#ff69b4"),
            enemy(N::ChronoSoldier, 1.5, 90.0, 28.0, A::Light, "#f0f8ff"),
            enemy(N::Amalgamation, 0.4, 2000.0, 300.0, A::Heavy, "#8b0000"),
            enemy(N::Render, 1.8, 1500.0, 400.0, A::MagicResist, "#4b0082"),
            enemy(N::Tyrant, 0.6, 3000.0, 500.0, A::Heavy, "#b8860b"),
            enemy(N::Wraith, 1.0, 5000.0, 1000.0, A::Shifting, "#000000"),
        ];

        let maps = vec![
            MapSpec {
                id: MapId::Etherfields,
                name: "Arcanian Etherfields".into(),
                theme: "Magical Meadow".into(),
                description: "Winding trails through glowing flora. Mana blooms aid defense.".into(),
                modifiers: vec!["Mana Blooms (+Mana)".into(), "Illusory Mist (-Range)".into()],
                power_name: "Awaken Spirits".into(),
                power_description:
                    "35% chance for a Spirit Warden to spawn when a tower falls (or 5% on kill)."
                        .into(),
                paths: vec![cells(&[
                    (0, 2), (4, 2), (4, 8), (10, 8), (10, 4), (16, 4), (16, 10), (23, 10),
                ])],
                start_mana_bonus: 0.0,
            },
            MapSpec {
                id: MapId::IceSpire,
                name: "Eternal Ice Spire".into(),
                theme: "Black Ice Castle".into(),
                description:
                    "A narrow, slippery path atop a mountain. Blizzards obscure vision.".into(),
                modifiers: vec!["Glacial Stone (+Slow Potency)".into(), "Blizzard (-Range)".into()],
                power_name: "Permafrost".into(),
                power_description: "Frozen enemies explode on death.".into(),
                paths: vec![cells(&[(0, 6), (6, 6), (6, 3), (18, 3), (18, 9), (23, 9)])],
                start_mana_bonus: 0.0,
            },
            MapSpec {
                id: MapId::BurningMaw,
                name: "Ignis' Burning Maw".into(),
                theme: "Volcanic Core".into(),
                description: "Superheated platforms. Paths converge over lava lakes.".into(),
                modifiers: vec![
                    "Geothermal Power (+Fire Dmg)".into(),
                    "Lava Surges (Area Dmg)".into(),
                ],
                power_name: "Earth's Wrath".into(),
                power_description: "Attacks may trigger a lava burst.".into(),
                paths: vec![
                    cells(&[(0, 2), (8, 2), (12, 6), (23, 6)]),
                    cells(&[(0, 11), (8, 11), (12, 7), (23, 7)]),
                ],
                start_mana_bonus: 0.0,
            },
            MapSpec {
                id: MapId::Xeros,
                name: "Lost City of Xeros".into(),
                theme: "Desert Ruins".into(),
                description: "Ancient mazes where time flows strangely. Enemies engage from hidden catacombs.".into(),
                modifiers: vec![
                    "Time Warps".into(),
                    "Hidden Catacombs (Spawn skipping)".into(),
                ],
                power_name: "Sands of Time".into(),
                power_description: "Chance to rewind enemy positions slightly on hit.".into(),
                paths: vec![cells(&[(0, 1), (22, 1), (22, 12), (2, 12), (2, 6), (23, 6)])],
                start_mana_bonus: 0.0,
            },
        ];

        let difficulties = vec![
            DifficultySpec { difficulty: Difficulty::Apprentice, hp_mod: 0.7, gold_mod: 0.625, cost_mod: 0.85 },
            DifficultySpec { difficulty: Difficulty::Engineer, hp_mod: 1.0, gold_mod: 0.5, cost_mod: 1.0 },
            DifficultySpec { difficulty: Difficulty::Master, hp_mod: 1.25, gold_mod: 0.4, cost_mod: 1.0 },
            DifficultySpec { difficulty: Difficulty::VoidTouched, hp_mod: 1.6, gold_mod: 0.3, cost_mod: 1.0 },
        ];

        let modules = vec![
            ModuleSpec {
                id: ModuleId::Targeting,
                name: "Smart Targeting".into(),
                description: "Prioritizes lowest HP enemies.".into(),
                cost: 50.0,
            },
            ModuleSpec {
                id: ModuleId::Overclock,
                name: "Overclock".into(),
                description: "Faster cooldown recovery.".into(),
                cost: 100.0,
            },
            ModuleSpec {
                id: ModuleId::RangeFinder,
                name: "Range Finder".into(),
                description: "+20% Range.".into(),
                cost: 75.0,
            },
        ];

        Self {
            towers,
            enemies,
            maps,
            difficulties,
            modules,
            upgrades: UpgradeCosts::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_validate() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn json_round_trip_preserves_tables() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = GameConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn missing_archetype_is_rejected() {
        let mut config = GameConfig::default();
        config.towers.retain(|t| t.kind != TowerType::Beacon);
        match config.validate() {
            Err(ConfigError::Missing { table, key }) => {
                assert_eq!(table, "tower");
                assert_eq!(key, "Beacon");
            }
            other => panic!("expected a missing-entry error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_map_is_rejected() {
        let mut config = GameConfig::default();
        let dup = config.maps[0].clone();
        config.maps.push(dup);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Duplicate { table: "map", .. })
        ));
    }

    #[test]
    fn waypoint_outside_grid_is_rejected() {
        let mut config = GameConfig::default();
        config.maps[1].paths[0].push(GridCell::new(30, 3));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WaypointOutOfBounds { map: MapId::IceSpire, .. })
        ));
    }

    #[test]
    fn non_positive_multiplier_is_rejected() {
        let mut config = GameConfig::default();
        config.difficulties[0].gold_mod = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::NonPositive { .. })));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn path_cells_cover_every_leg_orientation() {
        let config = GameConfig::default();
        let ether = config.map(MapId::Etherfields).unwrap();
        // Horizontal leg (0,2)-(4,2) and vertical leg (4,2)-(4,8).
        assert!(ether.is_path_cell(GridCell::new(2, 2)));
        assert!(ether.is_path_cell(GridCell::new(4, 5)));
        assert!(!ether.is_path_cell(GridCell::new(2, 5)));

        let maw = config.map(MapId::BurningMaw).unwrap();
        // Diagonal leg (8,2)-(12,6).
        assert!(maw.is_path_cell(GridCell::new(10, 4)));
        assert!(!maw.is_path_cell(GridCell::new(10, 3)));
        // Second fork.
        assert!(maw.is_path_cell(GridCell::new(4, 11)));
    }

    #[test]
    fn tower_range_is_in_world_units() {
        let config = GameConfig::default();
        assert_eq!(config.tower(TowerType::Cannon).unwrap().range(), 140.0);
        assert_eq!(config.tower(TowerType::Beacon).unwrap().range(), 280.0);
    }
}
