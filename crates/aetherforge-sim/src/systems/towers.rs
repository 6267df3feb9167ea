//! Tower targeting and attack engine.
//!
//! One branch per archetype behind a shared per-tower preamble:
//! cooldowns tick, malfunctions skip the turn, storms may start a new
//! malfunction, then range and targets are computed.
//!
//! - RESONATOR pulses every enemy in range when its cooldown expires.
//! - CHRONO pushes a short ICE status on every enemy in range each frame.
//! - Everything else picks one target, rolls the weather, and emits a
//!   projectile unless the roll missed.

use std::cmp::Ordering;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use aetherforge_core::components::{Enemy, Projectile, StatusEffect, Tower};
use aetherforge_core::config::{GameConfig, TowerSpec};
use aetherforge_core::constants::*;
use aetherforge_core::enums::*;
use aetherforge_core::events::SimEvent;
use aetherforge_core::state::GameState;
use aetherforge_core::types::distance;

use super::weather::{self, AttackRoll};
use super::{damage, particles, EntityIds};

const MALFUNCTION_COLOR: &str = "#555555";
const MISS_COLOR: &str = "#888888";
const EARTHS_WRATH_COLOR: &str = "#ef4444";

/// Effective attack range of `tower` under `weather`.
pub fn effective_range(tower: &Tower, spec: &TowerSpec, weather: WeatherType) -> f32 {
    let mut range = spec.range() * (1.0 + (tower.level as f32 - 1.0) * RANGE_PER_LEVEL);
    range *= weather::range_factor(weather);
    if tower.has_module(ModuleId::RangeFinder) {
        range *= RANGE_FINDER_FACTOR;
    }
    range
}

pub fn run(
    state: &mut GameState,
    config: &GameConfig,
    ids: &mut EntityIds,
    rng: &mut ChaCha8Rng,
) {
    let weather = state.weather;
    let earths_wrath = state.map == MapId::BurningMaw && state.location_power_unlocked;
    let GameState {
        towers,
        enemies,
        projectiles,
        particles,
        events,
        ..
    } = state;

    for tower in towers.iter_mut() {
        if tower.cooldown > 0.0 {
            tower.cooldown -= 1.0;
        }
        tower.ability_cooldown = tower.ability_cooldown.saturating_sub(1);
        if let Some(remaining) = tower.malfunction {
            tower.malfunction = remaining.checked_sub(1).filter(|r| *r > 0);
            continue;
        }

        let chance = weather::malfunction_chance(weather);
        if chance > 0.0 && rng.gen::<f64>() < chance {
            tower.malfunction = Some(MALFUNCTION_FRAMES);
            particles::spawn_burst(particles, ids, rng, tower.position, MALFUNCTION_COLOR, 5, 1.0);
            events.push(SimEvent::TowerMalfunction { tower_id: tower.id });
        }

        let Some(spec) = config.tower(tower.kind) else {
            continue;
        };
        let range = effective_range(tower, spec, weather);
        if tower.has_module(ModuleId::Overclock) {
            tower.cooldown -= 1.0;
        }

        let targets: Vec<usize> = enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| distance(tower.position, e.position) <= range)
            .map(|(i, _)| i)
            .collect();

        match tower.kind {
            TowerType::Resonator => {
                if tower.cooldown <= 0.0 && !targets.is_empty() {
                    let dmg = spec.damage * tower.level as f32;
                    for &i in &targets {
                        damage::apply_damage(
                            &mut enemies[i],
                            dmg,
                            Element::Sonic,
                            tower.infusion,
                            weather,
                        );
                    }
                    particles::spawn_burst(particles, ids, rng, tower.position, &spec.color, 15, 2.0);
                    tower.cooldown = spec.cooldown;
                }
            }
            TowerType::Chrono => {
                for &i in &targets {
                    enemies[i].effects.push(StatusEffect {
                        element: Element::Ice,
                        duration: CHRONO_PULSE_DURATION,
                        magnitude: CHRONO_PULSE_MAGNITUDE,
                    });
                }
            }
            _ => {
                if tower.cooldown > 0.0 {
                    continue;
                }
                let Some(target) = pick_target(tower, enemies, &targets) else {
                    continue;
                };

                let roll = weather::roll_attack(weather, rng);

                if earths_wrath && rng.gen::<f64>() < EARTHS_WRATH_CHANCE {
                    let enemy = &mut enemies[target];
                    damage::apply_damage(enemy, EARTHS_WRATH_DAMAGE, Element::Magma, None, weather);
                    let pos = enemy.position;
                    particles::spawn_burst(particles, ids, rng, pos, EARTHS_WRATH_COLOR, 15, 1.0);
                }

                tower.cooldown = if tower.level > 1 {
                    spec.cooldown / LEVEL_COOLDOWN_DIVISOR
                } else {
                    spec.cooldown
                };
                tower.cooldown *= weather::cooldown_factor(weather, tower.kind);

                if roll == AttackRoll::Miss {
                    particles::spawn_burst(particles, ids, rng, tower.position, MISS_COLOR, 3, 1.0);
                    continue;
                }

                projectiles.push(emit(tower, spec, enemies[target].id, roll, ids.next()));
            }
        }
    }
}

/// First enemy in range, or the weakest one for towers with smart targeting.
fn pick_target(tower: &Tower, enemies: &[Enemy], targets: &[usize]) -> Option<usize> {
    if tower.has_module(ModuleId::Targeting) {
        targets.iter().copied().min_by(|&a, &b| {
            enemies[a]
                .health
                .partial_cmp(&enemies[b].health)
                .unwrap_or(Ordering::Equal)
        })
    } else {
        targets.first().copied()
    }
}

fn emit(tower: &Tower, spec: &TowerSpec, target_id: u32, roll: AttackRoll, id: u32) -> Projectile {
    let (kind, speed, chain_remaining) = match tower.kind {
        TowerType::Beacon => (ProjectileKind::Beam, INSTANT_PROJECTILE_SPEED, None),
        TowerType::Tesla => (
            ProjectileKind::Chain,
            INSTANT_PROJECTILE_SPEED,
            Some(CHAIN_BASE_COUNT + u32::from(tower.level - 1)),
        ),
        TowerType::Sentinel => (ProjectileKind::Missile, TRAVELING_PROJECTILE_SPEED, None),
        _ => (ProjectileKind::Bullet, TRAVELING_PROJECTILE_SPEED, None),
    };
    Projectile {
        id,
        position: tower.position,
        target_id,
        damage: spec.damage * tower.level as f32 * roll.multiplier(),
        speed,
        element: tower.element(),
        kind,
        chain_remaining,
        color: spec.color.clone(),
    }
}
