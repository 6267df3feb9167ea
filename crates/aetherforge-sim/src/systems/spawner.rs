//! Spawner: emits enemies from the director's plan.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use aetherforge_core::components::Enemy;
use aetherforge_core::config::{EnemySpec, GameConfig, MapSpec};
use aetherforge_core::constants::HEAVY_ARMOR_VALUE;
use aetherforge_core::enums::ArmorClass;
use aetherforge_core::state::GameState;
use aetherforge_director::WavePlan;

use super::EntityIds;

/// Advance the spawn timer against the segment holding the next spawn.
/// Returns `false` once every segment of `plan` is exhausted.
pub fn run(
    state: &mut GameState,
    plan: &WavePlan,
    config: &GameConfig,
    ids: &mut EntityIds,
    rng: &mut ChaCha8Rng,
) -> bool {
    let Some(segment) = plan.segment_at(state.spawned_in_wave) else {
        return false;
    };

    state.spawn_timer += 1;
    if state.spawn_timer < segment.interval {
        return true;
    }
    state.spawn_timer = 0;
    state.spawned_in_wave += 1;

    match (config.enemy(segment.kind), config.map(state.map)) {
        (Some(spec), Some(map)) => {
            let enemy = spawn(spec, map, plan.health_scale, ids, rng);
            state.enemies.push(enemy);
        }
        _ => tracing::warn!(kind = ?segment.kind, "no table entry for scheduled spawn"),
    }
    true
}

/// Build one enemy at the head of a randomly chosen path.
pub fn spawn(
    spec: &EnemySpec,
    map: &MapSpec,
    health_scale: f32,
    ids: &mut EntityIds,
    rng: &mut ChaCha8Rng,
) -> Enemy {
    let path_id = if map.paths.len() > 1 {
        rng.gen_range(0..map.paths.len())
    } else {
        0
    };
    let position = map
        .paths
        .get(path_id)
        .and_then(|path| path.first())
        .map(|cell| cell.center())
        .unwrap_or_default();
    let health = spec.health * health_scale;

    Enemy {
        id: ids.next(),
        kind: spec.kind,
        position,
        health,
        max_health: health,
        speed: spec.speed,
        base_speed: spec.speed,
        path_index: 0,
        path_id,
        bounty: spec.bounty,
        armor_class: spec.armor,
        armor: if spec.armor == ArmorClass::Heavy {
            HEAVY_ARMOR_VALUE
        } else {
            0.0
        },
        ethereal: false,
        effects: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aetherforge_core::enums::{Difficulty, EnemyType, MapId};
    use aetherforge_director::generate_wave;
    use rand::SeedableRng;

    #[test]
    fn spawns_on_interval_and_exhausts() {
        let config = GameConfig::default();
        let mut state = GameState::new_run(MapId::IceSpire, Difficulty::Engineer, 0.0);
        let plan = generate_wave(1, Difficulty::Engineer, &[], &config);
        let mut ids = EntityIds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for _ in 0..59 {
            assert!(run(&mut state, &plan, &config, &mut ids, &mut rng));
        }
        assert!(state.enemies.is_empty(), "first spawn waits a full interval");
        run(&mut state, &plan, &config, &mut ids, &mut rng);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].kind, EnemyType::Grunt);
        assert_eq!(state.spawn_timer, 0);

        let mut frames = 0;
        while run(&mut state, &plan, &config, &mut ids, &mut rng) {
            frames += 1;
            assert!(frames < 10_000, "schedule never exhausted");
        }
        assert_eq!(state.enemies.len() as u32, plan.total_count());
    }

    #[test]
    fn heavy_archetypes_carry_armor_and_scaled_health() {
        let config = GameConfig::default();
        let map = config.map(MapId::Etherfields).unwrap();
        let mut ids = EntityIds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let brute = spawn(config.enemy(EnemyType::Brute).unwrap(), map, 1.5, &mut ids, &mut rng);
        assert_eq!(brute.armor, 20.0);
        assert_eq!(brute.health, 300.0);
        assert_eq!(brute.max_health, 300.0);
        assert_eq!(brute.position, map.paths[0][0].center());

        let grunt = spawn(config.enemy(EnemyType::Grunt).unwrap(), map, 1.0, &mut ids, &mut rng);
        assert_eq!(grunt.armor, 0.0);
        assert_eq!(grunt.speed, grunt.base_speed);
    }

    #[test]
    fn multi_path_maps_use_every_path() {
        let config = GameConfig::default();
        let map = config.map(MapId::BurningMaw).unwrap();
        let spec = config.enemy(EnemyType::Scuttler).unwrap();
        let mut ids = EntityIds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut used = [false; 2];
        for _ in 0..64 {
            used[spawn(spec, map, 1.0, &mut ids, &mut rng).path_id] = true;
        }
        assert_eq!(used, [true, true]);
    }
}
