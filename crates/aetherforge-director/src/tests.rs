use aetherforge_core::components::Tower;
use aetherforge_core::config::GameConfig;
use aetherforge_core::enums::{Difficulty, Element, EnemyType, TowerType};
use aetherforge_core::types::GridCell;
use proptest::prelude::*;

use crate::composer::*;
use crate::events::NamedEvent;
use crate::roster::{DamageProfile, RosterAnalysis};

fn tower(id: u32, kind: TowerType, infusion: Option<Element>) -> Tower {
    let cell = GridCell::new(id as i32 % 20, 13);
    Tower {
        id,
        kind,
        cell,
        position: cell.center(),
        cooldown: 0.0,
        level: 1,
        infusion,
        modules: Vec::new(),
        ability_cooldown: 0,
        malfunction: None,
    }
}

fn roster(kinds: &[TowerType]) -> Vec<Tower> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, &k)| tower(i as u32 + 1, k, None))
        .collect()
}

fn kinds(plan: &WavePlan) -> Vec<EnemyType> {
    plan.segments.iter().map(|s| s.kind).collect()
}

#[test]
fn test_empty_roster_is_standard_protocol() {
    let config = GameConfig::default();
    let plan = generate_wave(1, Difficulty::Engineer, &[], &config);
    assert_eq!(plan.adaptation, LABEL_STANDARD);
    assert_eq!(plan.event, None);
    assert_eq!(
        plan.segments,
        vec![
            WaveSegment {
                kind: EnemyType::Grunt,
                count: 4,
                interval: 60
            },
            WaveSegment {
                kind: EnemyType::Scuttler,
                count: 9,
                interval: 20
            },
        ]
    );
}

#[test]
fn test_physical_roster_gets_armor() {
    let config = GameConfig::default();
    let towers = roster(&[TowerType::Cannon, TowerType::Cannon, TowerType::Golem]);
    let plan = generate_wave(4, Difficulty::Engineer, &towers, &config);
    assert_eq!(plan.adaptation, LABEL_ARMOR);
    assert_eq!(plan.segments[0].kind, EnemyType::Brute);
    assert_eq!(plan.segments[0].count, 6);
}

#[test]
fn test_magic_roster_gets_anti_magic() {
    let config = GameConfig::default();
    let towers = vec![
        tower(1, TowerType::Sentinel, None),
        tower(2, TowerType::Cannon, Some(Element::Fire)),
    ];
    let analysis = RosterAnalysis::analyze(&towers, &config);
    assert_eq!(analysis.magic_damage, 50.0, "infused towers count as magic");
    assert_eq!(analysis.physical_damage, 0.0);
    assert_eq!(analysis.profile(), DamageProfile::MagicHeavy);

    let plan = generate_wave(3, Difficulty::Engineer, &towers, &config);
    assert_eq!(plan.adaptation, LABEL_ANTI_MAGIC);
    assert_eq!(plan.segments[0].kind, EnemyType::Weaver);
}

#[test]
fn test_dominance_needs_fifty_percent_margin() {
    let config = GameConfig::default();
    // Sentinel 35 magic vs Cannon 15 + Tesla 20 = 35 physical.
    let towers = roster(&[TowerType::Sentinel, TowerType::Cannon, TowerType::Tesla]);
    let analysis = RosterAnalysis::analyze(&towers, &config);
    assert_eq!(analysis.profile(), DamageProfile::Balanced);
}

#[test]
fn test_area_heavy_roster_gets_flankers() {
    let config = GameConfig::default();
    // 2 of 3 towers area-capable: 2 > 1.2.
    let towers = roster(&[TowerType::Tesla, TowerType::Resonator, TowerType::Sentinel]);
    let plan = generate_wave(6, Difficulty::Engineer, &towers, &config);
    assert!(
        plan.adaptation.ends_with(LABEL_FLANKERS),
        "adaptation was {:?}",
        plan.adaptation
    );
    let flank = plan.segments[1];
    assert_eq!(flank.kind, EnemyType::Thief);
    assert_eq!(flank.count, 5);
    assert_eq!(flank.interval, 100);
}

#[test]
fn test_area_share_threshold_is_strict() {
    let config = GameConfig::default();
    // 2 of 5 = exactly 40 %, not area-heavy.
    let towers = roster(&[
        TowerType::Tesla,
        TowerType::Beacon,
        TowerType::Cannon,
        TowerType::Cannon,
        TowerType::Golem,
    ]);
    assert!(!RosterAnalysis::analyze(&towers, &config).is_area_heavy());
}

#[test]
fn test_elite_segment_after_wave_seven() {
    let config = GameConfig::default();
    let w7 = generate_wave(7, Difficulty::Engineer, &[], &config);
    assert!(!kinds(&w7).contains(&EnemyType::Leech));

    let w8 = generate_wave(8, Difficulty::Engineer, &[], &config);
    let last = *w8.segments.last().unwrap();
    assert_eq!(last.kind, EnemyType::Leech);
    assert_eq!(last.count, 3);
    assert_eq!(last.interval, 120);
}

#[test]
fn test_boss_wave_ignores_roster() {
    let config = GameConfig::default();
    let rosters = [
        Vec::new(),
        roster(&[TowerType::Cannon, TowerType::Golem]),
        roster(&[TowerType::Tesla, TowerType::Resonator, TowerType::Beacon]),
    ];
    for towers in &rosters {
        let plan = generate_wave(10, Difficulty::Engineer, towers, &config);
        assert_eq!(plan.adaptation, LABEL_BOSS);
        assert_eq!(kinds(&plan), vec![EnemyType::Amalgamation, EnemyType::Scuttler]);
        assert_eq!(plan.segments[0].count, 1);
        assert_eq!(plan.segments[0].interval, 300);
        assert_eq!(plan.segments[1].count, 20);
        assert_eq!(plan.segments[1].interval, 30);
    }
}

#[test]
fn test_boss_tiers_escalate() {
    assert_eq!(boss_for_wave(10), EnemyType::Amalgamation);
    assert_eq!(boss_for_wave(20), EnemyType::Render);
    assert_eq!(boss_for_wave(30), EnemyType::Tyrant);
    assert_eq!(boss_for_wave(40), EnemyType::Wraith);
    assert_eq!(boss_for_wave(90), EnemyType::Wraith);
}

#[test]
fn test_named_events() {
    assert_eq!(NamedEvent::for_wave(5), Some(NamedEvent::MiniBoss));
    assert_eq!(NamedEvent::for_wave(10), Some(NamedEvent::Swarm));
    assert_eq!(NamedEvent::for_wave(15).map(|e| e.label()), Some("Silence Wave"));
    assert_eq!(
        NamedEvent::for_wave(20).map(|e| e.label()),
        Some("BOSS: The Amalgamation")
    );
    assert_eq!(NamedEvent::for_wave(11), None);
}

#[test]
fn test_mini_boss_leads_wave_five() {
    let config = GameConfig::default();
    let plan = generate_wave(5, Difficulty::Engineer, &[], &config);
    assert_eq!(plan.event_label(), Some("Mini-Boss: Brute Alpha"));
    assert_eq!(plan.segments[0].kind, EnemyType::Brute);
    assert_eq!(plan.segments[0].count, 1);
    assert_eq!(plan.segments[1].kind, EnemyType::Grunt);
}

#[test]
fn test_segment_lookup_walks_in_order() {
    let config = GameConfig::default();
    let plan = generate_wave(1, Difficulty::Engineer, &[], &config);
    assert_eq!(plan.total_count(), 13);
    assert_eq!(plan.segment_at(0).map(|s| s.kind), Some(EnemyType::Grunt));
    assert_eq!(plan.segment_at(3).map(|s| s.kind), Some(EnemyType::Grunt));
    assert_eq!(plan.segment_at(4).map(|s| s.kind), Some(EnemyType::Scuttler));
    assert_eq!(plan.segment_at(12).map(|s| s.kind), Some(EnemyType::Scuttler));
    assert_eq!(plan.segment_at(13), None);
}

#[test]
fn test_health_scale_uses_difficulty_and_wave() {
    let config = GameConfig::default();
    let plan = generate_wave(5, Difficulty::VoidTouched, &[], &config);
    assert!((plan.health_scale - 1.6 * 1.4).abs() < 1e-5);
    let plan = generate_wave(1, Difficulty::Apprentice, &[], &config);
    assert!((plan.health_scale - 0.7 * 1.08).abs() < 1e-5);
}

proptest! {
    #[test]
    fn prop_boss_waves_are_roster_independent(
        milestone in 1u32..10,
        picks in proptest::collection::vec(0usize..7, 0..12),
    ) {
        let config = GameConfig::default();
        let wave = milestone * 10;
        let kinds: Vec<TowerType> = picks.iter().map(|&i| TowerType::ALL[i]).collect();
        let towers = roster(&kinds);
        let with = generate_wave(wave, Difficulty::Master, &towers, &config);
        let without = generate_wave(wave, Difficulty::Master, &[], &config);
        prop_assert_eq!(with, without);
    }

    #[test]
    fn prop_every_plan_spawns_something(
        wave in 1u32..60,
        picks in proptest::collection::vec(0usize..7, 0..12),
    ) {
        let config = GameConfig::default();
        let kinds: Vec<TowerType> = picks.iter().map(|&i| TowerType::ALL[i]).collect();
        let plan = generate_wave(wave, Difficulty::Engineer, &roster(&kinds), &config);
        prop_assert!(plan.total_count() > 0);
        prop_assert!(plan.segments.iter().all(|s| s.interval > 0));
    }
}
