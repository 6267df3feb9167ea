//! Enemy movement and lifecycle.
//!
//! Iterates back to front so that removing an enemy mid-pass never skips or
//! double-processes a neighbor. The leak check runs before the death check:
//! an enemy standing on its final waypoint leaks even if a status tick just
//! killed it.

use rand_chacha::ChaCha8Rng;

use aetherforge_core::components::{Enemy, StatusEffect};
use aetherforge_core::config::{GameConfig, MapSpec};
use aetherforge_core::constants::*;
use aetherforge_core::enums::{Element, EnemyType, GamePhase, MapId};
use aetherforge_core::events::SimEvent;
use aetherforge_core::state::GameState;
use aetherforge_core::types::{distance, step_toward, Position, Step};

use super::{damage, particles, weather, EntityIds};

const DEATH_COLOR: &str = "#b5a642";
const PERMAFROST_COLOR: &str = "#00f3ff";

/// Advance every enemy by one frame: statuses, weather, movement, leaks
/// and deaths.
pub fn run(
    state: &mut GameState,
    config: &GameConfig,
    ids: &mut EntityIds,
    rng: &mut ChaCha8Rng,
) {
    let Some(map) = config.map(state.map) else {
        return;
    };
    let gold_mod = gold_mod(state, config);
    let shred = weather::shreds_armor(state.weather, state.weather_timer);
    let phased = (state.time.active_frames / ETHEREAL_PHASE_FRAMES) % 2 == 0;

    for i in (0..state.enemies.len()).rev() {
        // Already finished off by a permafrost burst earlier in this pass.
        if state.enemies[i].is_dead() {
            kill(state, i, gold_mod, ids, rng);
            continue;
        }
        let enemy = &mut state.enemies[i];

        let tick = damage::tick_statuses(&mut enemy.effects);
        if shred && enemy.armor > 0.0 {
            enemy.armor = (enemy.armor - ACID_RAIN_SHRED).max(0.0);
        }
        enemy.health -= tick.damage_over_time;
        enemy.speed = enemy.base_speed * tick.speed_factor;

        if enemy.kind == EnemyType::Weaver {
            enemy.ethereal = phased;
        }

        match next_waypoint(map, enemy) {
            None => {
                leak(state, i);
                continue;
            }
            Some(goal) => match step_toward(enemy.position, goal, enemy.speed) {
                Step::Arrived(pos) => {
                    enemy.position = pos;
                    enemy.path_index += 1;
                }
                Step::Moved(pos) => enemy.position = pos,
            },
        }

        if state.enemies[i].is_dead() {
            kill(state, i, gold_mod, ids, rng);
        }
    }
}

/// Finalize every enemy left at or below zero health by projectiles, the
/// nuke or a chain of location-power deaths.
pub fn cull_dead(
    state: &mut GameState,
    config: &GameConfig,
    ids: &mut EntityIds,
    rng: &mut ChaCha8Rng,
) {
    let gold_mod = gold_mod(state, config);
    // Each kill can push a neighbour below zero, so rescan until none remain.
    while let Some(i) = state.enemies.iter().position(Enemy::is_dead) {
        kill(state, i, gold_mod, ids, rng);
    }
}

fn gold_mod(state: &GameState, config: &GameConfig) -> f64 {
    config.difficulty(state.difficulty).map_or(1.0, |d| d.gold_mod)
}

fn next_waypoint(map: &MapSpec, enemy: &Enemy) -> Option<Position> {
    map.paths
        .get(enemy.path_id)
        .and_then(|path| path.get(enemy.path_index + 1))
        .map(|cell| cell.center())
}

/// Remove the enemy at `index` as a leak and charge the player for it.
fn leak(state: &mut GameState, index: usize) {
    let enemy = state.enemies.remove(index);
    state.lives = state.lives.saturating_sub(1);

    let stolen = if enemy.kind == EnemyType::Thief {
        let before = state.money;
        state.money = (state.money - THIEF_STEAL).max(0.0);
        before - state.money
    } else {
        0.0
    };
    state.events.push(SimEvent::EnemyLeaked {
        enemy_id: enemy.id,
        kind: enemy.kind,
        stolen,
    });

    if state.lives == 0 && !state.is_game_over {
        state.is_game_over = true;
        state.is_playing = false;
        state.phase = GamePhase::Defeat;
        state.events.push(SimEvent::GameOver { wave: state.wave });
        tracing::info!(wave = state.wave, "defenses overrun");
    }
}

/// Remove the enemy at `index` as a kill: bounty, soul essence, permafrost
/// and the death burst.
fn kill(
    state: &mut GameState,
    index: usize,
    gold_mod: f64,
    ids: &mut EntityIds,
    rng: &mut ChaCha8Rng,
) {
    let enemy = state.enemies.remove(index);
    let bounty = enemy.bounty * gold_mod;
    state.money += bounty;
    if enemy.kind.drops_soul_essence() {
        state.soul_essence += 1;
    }

    if state.map == MapId::IceSpire && state.location_power_unlocked {
        for other in state
            .enemies
            .iter_mut()
            .filter(|o| distance(o.position, enemy.position) < PERMAFROST_RADIUS)
        {
            other.health -= PERMAFROST_DAMAGE;
            other.effects.push(StatusEffect {
                element: Element::Ice,
                duration: PERMAFROST_ICE_DURATION,
                magnitude: PERMAFROST_ICE_MAGNITUDE,
            });
        }
        particles::spawn_burst(
            &mut state.particles,
            ids,
            rng,
            enemy.position,
            PERMAFROST_COLOR,
            20,
            1.0,
        );
    }

    particles::spawn_burst(
        &mut state.particles,
        ids,
        rng,
        enemy.position,
        DEATH_COLOR,
        10,
        1.0,
    );
    state.events.push(SimEvent::EnemyKilled {
        enemy_id: enemy.id,
        kind: enemy.kind,
        position: enemy.position,
        bounty,
    });
}
