//! Simulation constants and tuning parameters.
//!
//! Archetype stat tables live in [`crate::config`]; the values here are the
//! fixed rules of the simulation itself.

/// Frames per second of the host animation callback.
pub const FPS: u32 = 60;

// --- Grid ---

pub const GRID_COLS: i32 = 24;
pub const GRID_ROWS: i32 = 14;

/// Side length of one grid cell in world units.
pub const TILE_SIZE: f32 = 40.0;

// --- Run start ---

pub const INITIAL_MONEY: f64 = 450.0;
pub const INITIAL_LIVES: u32 = 20;
pub const INITIAL_MANA: f32 = 100.0;
pub const MAX_MANA: f32 = 200.0;

/// Mana regained per active frame.
pub const MANA_REGEN: f32 = 0.05;

// --- Status effects ---

pub const FIRE_DURATION: u32 = 120;
pub const FIRE_MAGNITUDE: f32 = 0.5;
pub const POISON_DURATION: u32 = 300;
pub const POISON_MAGNITUDE: f32 = 0.2;
pub const ICE_DURATION: u32 = 60;
pub const ICE_MAGNITUDE: f32 = 0.3;

/// Speed multiplier contributed by each active ICE stack.
pub const ICE_SLOW_FACTOR: f32 = 0.7;

/// Slow-field pulse applied by CHRONO towers every frame.
pub const CHRONO_PULSE_DURATION: u32 = 2;
pub const CHRONO_PULSE_MAGNITUDE: f32 = 0.5;

/// Frames per ethereal half-cycle of a phasing enemy.
pub const ETHEREAL_PHASE_FRAMES: u64 = 180;

/// Armor value assigned to HEAVY archetypes at spawn.
pub const HEAVY_ARMOR_VALUE: f32 = 20.0;

// --- Weather ---

/// Weather phase timer threshold (frames).
pub const WEATHER_CYCLE_FRAMES: u32 = 900;

/// Acid rain shreds armor on frames where `timer % cadence == 0`.
pub const ACID_RAIN_CADENCE: u32 = 60;
pub const ACID_RAIN_SHRED: f32 = 2.0;

pub const MIST_RANGE_FACTOR: f32 = 0.6;
pub const MIST_MELEE_COOLDOWN_FACTOR: f32 = 0.66;

pub const STORM_MALFUNCTION_CHANCE: f64 = 0.005;
pub const MALFUNCTION_FRAMES: u32 = 120;

pub const SOLAR_FIRE_FACTOR: f32 = 1.25;
pub const SOLAR_ICE_FACTOR: f32 = 0.75;

/// Quantum flux bands: `roll < MISS` misses, `roll < CRIT` crits.
pub const FLUX_MISS_BAND: f64 = 0.1;
pub const FLUX_CRIT_BAND: f64 = 0.2;
pub const FLUX_CRIT_MULTIPLIER: f32 = 3.0;

// --- Towers ---

pub const MAX_TOWER_LEVEL: u8 = 3;
pub const MAX_MODULES: usize = 2;

/// Range bonus per level above 1.
pub const RANGE_PER_LEVEL: f32 = 0.15;

/// Cooldown divisor for towers above level 1.
pub const LEVEL_COOLDOWN_DIVISOR: f32 = 1.2;

pub const RANGE_FINDER_FACTOR: f32 = 1.2;

// --- Projectiles ---

pub const TRAVELING_PROJECTILE_SPEED: f32 = 12.0;

/// Sentinel speed carried by instant projectiles.
pub const INSTANT_PROJECTILE_SPEED: f32 = 999.0;

/// Chain relay search radius (strict).
pub const CHAIN_RELAY_RADIUS: f32 = 100.0;

/// Base chain count of a level 1 chain tower.
pub const CHAIN_BASE_COUNT: u32 = 2;

// --- Economy ---

/// Price growth per already-built tower of the same archetype.
pub const TOWER_COUNT_PRICE_STEP: f64 = 0.15;

pub const WAVE_CLEAR_BASE_GOLD: f64 = 100.0;
pub const WAVE_CLEAR_GOLD_PER_WAVE: f64 = 15.0;
pub const INTEREST_RATE: f64 = 0.03;
pub const INTEREST_CAP: f64 = 200.0;
pub const WAVE_CLEAR_MANA: f32 = 20.0;

/// Gold stolen by a leaking thief.
pub const THIEF_STEAL: f64 = 5.0;

// --- Abilities ---

pub const REPAIR_COST: f32 = 50.0;
pub const REPAIR_LIVES: u32 = 5;
pub const MAX_LIVES: u32 = 50;
pub const OVERDRIVE_COST: f32 = 75.0;
pub const NUKE_COST: f32 = 100.0;
pub const NUKE_DAMAGE: f32 = 100.0;

// --- Location powers ---

/// Wave at which the map's location power unlocks.
pub const LOCATION_POWER_WAVE: u32 = 10;

pub const PERMAFROST_RADIUS: f32 = 60.0;
pub const PERMAFROST_DAMAGE: f32 = 20.0;
pub const PERMAFROST_ICE_DURATION: u32 = 60;
pub const PERMAFROST_ICE_MAGNITUDE: f32 = 0.5;

pub const EARTHS_WRATH_CHANCE: f64 = 0.1;
pub const EARTHS_WRATH_DAMAGE: f32 = 50.0;

pub const SANDS_OF_TIME_CHANCE: f64 = 0.05;
pub const SANDS_OF_TIME_DISTANCE: f32 = 20.0;

// --- Spawning ---

/// Health growth per wave for spawned enemies.
pub const HEALTH_GROWTH_PER_WAVE: f32 = 0.08;

// --- Particles ---

pub const PARTICLE_MAX_LIFE: f32 = 40.0;
