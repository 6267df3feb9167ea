//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Tower archetype. Each archetype is one attack variant of the tower engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TowerType {
    /// Rapid-firing ballistic tower.
    Cannon,
    /// Long-range homing arcane bolts.
    Sentinel,
    /// Instant lightning that chains between nearby enemies.
    Tesla,
    /// Slow field applied to everything in range.
    Chrono,
    /// Heavy short-range melee hits.
    Golem,
    /// Periodic area pulse.
    Resonator,
    /// Continuous instant beam.
    Beacon,
}

impl TowerType {
    pub const ALL: [TowerType; 7] = [
        TowerType::Cannon,
        TowerType::Sentinel,
        TowerType::Tesla,
        TowerType::Chrono,
        TowerType::Golem,
        TowerType::Resonator,
        TowerType::Beacon,
    ];

    /// Element the archetype attacks with when no infusion is set.
    pub fn native_element(self) -> Element {
        match self {
            TowerType::Cannon | TowerType::Sentinel | TowerType::Golem => Element::Physical,
            TowerType::Tesla => Element::Lightning,
            TowerType::Chrono => Element::Ice,
            TowerType::Resonator => Element::Sonic,
            TowerType::Beacon => Element::Uv,
        }
    }

    /// Whether the archetype can hit more than one enemy per attack.
    /// Used by the wave director's roster analysis.
    pub fn is_area_capable(self) -> bool {
        matches!(
            self,
            TowerType::Tesla | TowerType::Resonator | TowerType::Beacon
        )
    }
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnemyType {
    // --- Basic ---
    Scuttler,
    Grunt,
    /// Steals gold when it leaks.
    Thief,
    // --- Elite ---
    /// Heavy armor.
    Brute,
    /// Phases in and out of the ethereal state.
    Weaver,
    Spreader,
    Drone,
    // --- Specialist ---
    Leech,
    Siege,
    Doppel,
    ChronoSoldier,
    // --- Boss tiers ---
    Amalgamation,
    Render,
    Tyrant,
    Wraith,
}

impl EnemyType {
    pub const ALL: [EnemyType; 15] = [
        EnemyType::Scuttler,
        EnemyType::Grunt,
        EnemyType::Thief,
        EnemyType::Brute,
        EnemyType::Weaver,
        EnemyType::Spreader,
        EnemyType::Drone,
        EnemyType::Leech,
        EnemyType::Siege,
        EnemyType::Doppel,
        EnemyType::ChronoSoldier,
        EnemyType::Amalgamation,
        EnemyType::Render,
        EnemyType::Tyrant,
        EnemyType::Wraith,
    ];

    pub fn is_boss(self) -> bool {
        matches!(
            self,
            EnemyType::Amalgamation | EnemyType::Render | EnemyType::Tyrant | EnemyType::Wraith
        )
    }

    /// Elites and bosses drop soul essence on death.
    pub fn drops_soul_essence(self) -> bool {
        self.is_boss() || matches!(self, EnemyType::Brute | EnemyType::Leech)
    }
}

/// Damage element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Element {
    Physical,
    Fire,
    Ice,
    Lightning,
    Necrotic,
    Holy,
    Chaos,
    Water,
    Metal,
    Wind,
    Crystal,
    Void,
    Arcane,
    Magma,
    Stone,
    Kinetic,
    Sonic,
    Poison,
    Fear,
    Uv,
    Gamma,
    Infrared,
}

/// Categorical armor class of an enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmorClass {
    #[default]
    None,
    Light,
    /// Halves physical damage.
    Heavy,
    Fortified,
    /// Halves non-physical damage.
    MagicResist,
    Shifting,
}

/// Projectile behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectileKind {
    Bullet,
    Missile,
    Beam,
    Chain,
    Pulse,
}

impl ProjectileKind {
    /// Instant kinds resolve in the frame they are emitted.
    pub fn is_instant(self) -> bool {
        matches!(self, ProjectileKind::Beam | ProjectileKind::Chain)
    }
}

/// Weather condition. Each variant is a modifier table consulted by the
/// damage resolver, enemy update and tower engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherType {
    #[default]
    Clear,
    /// Armor shreds over time.
    AcidRain,
    /// Range down, melee attacks faster.
    EtherealMist,
    /// Towers malfunction occasionally.
    GeomagneticStorm,
    /// Fire up, ice down.
    SolarFlare,
    /// Attacks may crit or miss.
    QuantumFlux,
}

impl WeatherType {
    pub const ALL: [WeatherType; 6] = [
        WeatherType::Clear,
        WeatherType::AcidRain,
        WeatherType::EtherealMist,
        WeatherType::GeomagneticStorm,
        WeatherType::SolarFlare,
        WeatherType::QuantumFlux,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "Clear Skies",
            Self::AcidRain => "Acidic Rain",
            Self::EtherealMist => "Ethereal Mist",
            Self::GeomagneticStorm => "Geomagnetic Storm",
            Self::SolarFlare => "Solar Flare",
            Self::QuantumFlux => "Quantum Flux",
        }
    }
}

/// Difficulty level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Apprentice,
    #[default]
    Engineer,
    Master,
    VoidTouched,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Apprentice,
        Difficulty::Engineer,
        Difficulty::Master,
        Difficulty::VoidTouched,
    ];
}

/// Map identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MapId {
    #[default]
    Etherfields,
    IceSpire,
    BurningMaw,
    Xeros,
}

impl MapId {
    pub const ALL: [MapId; 4] = [
        MapId::Etherfields,
        MapId::IceSpire,
        MapId::BurningMaw,
        MapId::Xeros,
    ];
}

/// Passive tower module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleId {
    /// Prioritizes the lowest-health enemy in range.
    Targeting,
    /// One extra cooldown decrement per frame.
    Overclock,
    /// Multiplies range.
    RangeFinder,
}

/// Player-triggered mana ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ability {
    /// Restore lives.
    Repair,
    /// Zero every tower cooldown.
    Overdrive,
    /// Flat damage to every enemy.
    Nuke,
}

/// Top-level run phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    /// Lives reached zero. Terminal for the current run.
    Defeat,
}
