//! Weather phase cycling and the per-condition modifier table.
//!
//! The modifier functions are pure lookups consulted by the damage
//! resolver, the enemy pass and the tower engine.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use aetherforge_core::constants::*;
use aetherforge_core::enums::{Element, TowerType, WeatherType};
use aetherforge_core::events::SimEvent;
use aetherforge_core::state::GameState;

/// Outcome of the weather roll on a single-target attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackRoll {
    Normal,
    Miss,
    Crit,
}

impl AttackRoll {
    pub fn multiplier(self) -> f32 {
        match self {
            AttackRoll::Normal => 1.0,
            AttackRoll::Miss => 0.0,
            AttackRoll::Crit => FLUX_CRIT_MULTIPLIER,
        }
    }
}

/// Advance the phase timer; past the threshold pick a new condition
/// uniformly. Runs only during active play.
pub fn run(state: &mut GameState, rng: &mut ChaCha8Rng) {
    state.weather_timer += 1;
    if state.weather_timer <= WEATHER_CYCLE_FRAMES {
        return;
    }
    state.weather_timer = 0;
    let next = WeatherType::ALL[rng.gen_range(0..WeatherType::ALL.len())];
    if next != state.weather {
        tracing::info!(weather = next.as_str(), "weather changed");
        state.events.push(SimEvent::WeatherChanged { weather: next });
    }
    state.weather = next;
}

/// Elemental damage multiplier.
pub fn damage_factor(weather: WeatherType, element: Element) -> f32 {
    match (weather, element) {
        (WeatherType::SolarFlare, Element::Fire) => SOLAR_FIRE_FACTOR,
        (WeatherType::SolarFlare, Element::Ice) => SOLAR_ICE_FACTOR,
        _ => 1.0,
    }
}

/// Tower range multiplier.
pub fn range_factor(weather: WeatherType) -> f32 {
    match weather {
        WeatherType::EtherealMist => MIST_RANGE_FACTOR,
        _ => 1.0,
    }
}

/// Post-attack cooldown multiplier.
pub fn cooldown_factor(weather: WeatherType, kind: TowerType) -> f32 {
    match (weather, kind) {
        (WeatherType::EtherealMist, TowerType::Golem | TowerType::Tesla) => {
            MIST_MELEE_COOLDOWN_FACTOR
        }
        _ => 1.0,
    }
}

/// Per-tower, per-frame chance to start a malfunction.
pub fn malfunction_chance(weather: WeatherType) -> f64 {
    match weather {
        WeatherType::GeomagneticStorm => STORM_MALFUNCTION_CHANCE,
        _ => 0.0,
    }
}

/// Whether acid rain shreds armor this frame.
pub fn shreds_armor(weather: WeatherType, timer: u32) -> bool {
    weather == WeatherType::AcidRain && timer % ACID_RAIN_CADENCE == 0
}

/// Roll crit/miss. Consumes randomness only under quantum flux.
pub fn roll_attack(weather: WeatherType, rng: &mut ChaCha8Rng) -> AttackRoll {
    if weather != WeatherType::QuantumFlux {
        return AttackRoll::Normal;
    }
    let roll: f64 = rng.gen();
    if roll < FLUX_MISS_BAND {
        AttackRoll::Miss
    } else if roll < FLUX_CRIT_BAND {
        AttackRoll::Crit
    } else {
        AttackRoll::Normal
    }
}
