//! Projectile resolution.
//!
//! Beams and chains resolve in the frame they are processed and are always
//! removed. Bullets and missiles home on their target's current position
//! and are discarded without retargeting once the target is gone.
//!
//! Iteration runs back to front. A chain relay is appended behind the
//! cursor, so it resolves on the next frame.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use aetherforge_core::components::{Enemy, Projectile};
use aetherforge_core::config::{GameConfig, MapSpec};
use aetherforge_core::constants::*;
use aetherforge_core::enums::{MapId, ProjectileKind};
use aetherforge_core::state::GameState;
use aetherforge_core::types::{distance, step_toward, Step};

use super::{damage, particles, EntityIds};

pub fn run(
    state: &mut GameState,
    config: &GameConfig,
    ids: &mut EntityIds,
    rng: &mut ChaCha8Rng,
) {
    let weather = state.weather;
    let sands_of_time = state.map == MapId::Xeros && state.location_power_unlocked;
    let map = config.map(state.map);
    let GameState {
        enemies,
        projectiles,
        particles,
        ..
    } = state;

    for i in (0..projectiles.len()).rev() {
        let target_id = projectiles[i].target_id;
        let Some(target) = enemies.iter().position(|e| e.id == target_id) else {
            projectiles.remove(i);
            continue;
        };

        if projectiles[i].kind.is_instant() {
            let p = projectiles.remove(i);
            damage::apply_damage(&mut enemies[target], p.damage, p.element, None, weather);
            if p.kind == ProjectileKind::Chain {
                if let Some(next) = relay(&p, enemies, &enemies[target], ids) {
                    projectiles.push(next);
                }
            }
            continue;
        }

        let p = &projectiles[i];
        match step_toward(p.position, enemies[target].position, p.speed) {
            Step::Moved(pos) => projectiles[i].position = pos,
            Step::Arrived(_) => {
                let p = projectiles.remove(i);
                let enemy = &mut enemies[target];
                damage::apply_damage(enemy, p.damage, p.element, None, weather);
                particles::spawn_burst(particles, ids, rng, enemy.position, &p.color, 5, 1.0);
                if sands_of_time && rng.gen::<f64>() < SANDS_OF_TIME_CHANCE {
                    if let Some(map) = map {
                        rewind(enemy, map);
                    }
                }
            }
        }
    }
}

/// Next hop of a chain that just struck `struck`: the first other enemy in
/// container order strictly inside the relay radius.
pub fn relay(
    projectile: &Projectile,
    enemies: &[Enemy],
    struck: &Enemy,
    ids: &mut EntityIds,
) -> Option<Projectile> {
    let remaining = projectile.chain_remaining.filter(|n| *n > 0)?;
    let next = enemies.iter().find(|e| {
        e.id != struck.id && distance(struck.position, e.position) < CHAIN_RELAY_RADIUS
    })?;
    Some(Projectile {
        id: ids.next(),
        position: struck.position,
        target_id: next.id,
        chain_remaining: Some(remaining - 1),
        ..projectile.clone()
    })
}

/// Push `enemy` back toward the waypoint it last reached.
fn rewind(enemy: &mut Enemy, map: &MapSpec) {
    let Some(back) = map
        .paths
        .get(enemy.path_id)
        .and_then(|path| path.get(enemy.path_index))
    else {
        return;
    };
    enemy.position = match step_toward(enemy.position, back.center(), SANDS_OF_TIME_DISTANCE) {
        Step::Arrived(pos) | Step::Moved(pos) => pos,
    };
}
