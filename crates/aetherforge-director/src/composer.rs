//! Wave composition.
//!
//! [`generate_wave`] is a pure function of (wave, difficulty, roster). The
//! simulation calls it every frame, so a roster change mid-wave retargets
//! the spawns that remain.

use serde::Serialize;

use aetherforge_core::components::Tower;
use aetherforge_core::config::GameConfig;
use aetherforge_core::constants::HEALTH_GROWTH_PER_WAVE;
use aetherforge_core::enums::{Difficulty, EnemyType};

use crate::events::NamedEvent;
use crate::roster::{DamageProfile, RosterAnalysis};

/// A run of identical spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaveSegment {
    pub kind: EnemyType,
    pub count: u32,
    /// Frames between consecutive spawns.
    pub interval: u32,
}

impl WaveSegment {
    const fn new(kind: EnemyType, count: u32, interval: u32) -> Self {
        Self {
            kind,
            count,
            interval,
        }
    }
}

/// The director's output for one wave.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WavePlan {
    /// Consumed in order; segment N is exhausted before N+1 starts.
    pub segments: Vec<WaveSegment>,
    pub adaptation: String,
    pub event: Option<NamedEvent>,
    /// Multiplier on archetype base health for this wave's spawns.
    pub health_scale: f32,
}

impl WavePlan {
    pub fn total_count(&self) -> u32 {
        self.segments.iter().map(|s| s.count).sum()
    }

    /// Segment that contains the `spawned`-th spawn, or `None` when the
    /// schedule is exhausted.
    pub fn segment_at(&self, spawned: u32) -> Option<&WaveSegment> {
        let mut before = 0;
        for segment in &self.segments {
            if spawned < before + segment.count {
                return Some(segment);
            }
            before += segment.count;
        }
        None
    }

    pub fn event_label(&self) -> Option<&'static str> {
        self.event.map(|e| e.label())
    }
}

// --- Adaptation labels ---

pub const LABEL_STANDARD: &str = "Standard Protocol";
pub const LABEL_BOSS: &str = "Boss Encounter";
pub const LABEL_SWARM: &str = "Overwhelming Numbers";
pub const LABEL_ARMOR: &str = "Reinforced Armor (Countering Physical)";
pub const LABEL_ANTI_MAGIC: &str = "Anti-Magic Fields (Countering Magic)";
pub const LABEL_FLANKERS: &str = " + Dispersed Flankers";

/// Waves beyond this one carry a trailing elite segment.
const ELITE_AFTER_WAVE: u32 = 7;

/// Boss tier for a milestone wave.
pub fn boss_for_wave(wave: u32) -> EnemyType {
    match wave {
        0..=10 => EnemyType::Amalgamation,
        11..=20 => EnemyType::Render,
        21..=30 => EnemyType::Tyrant,
        _ => EnemyType::Wraith,
    }
}

/// Compose the wave plan for `wave`.
pub fn generate_wave(
    wave: u32,
    difficulty: Difficulty,
    towers: &[Tower],
    config: &GameConfig,
) -> WavePlan {
    let hp_mod = config.difficulty(difficulty).map_or(1.0, |d| d.hp_mod);
    let health_scale = hp_mod * (1.0 + HEALTH_GROWTH_PER_WAVE * wave as f32);
    let event = NamedEvent::for_wave(wave);

    // 1. Boss waves ignore the roster entirely.
    if wave > 0 && wave % 10 == 0 {
        return WavePlan {
            segments: vec![
                WaveSegment::new(boss_for_wave(wave), 1, 300),
                WaveSegment::new(EnemyType::Scuttler, 10 + wave, 30),
            ],
            adaptation: LABEL_BOSS.to_string(),
            event,
            health_scale,
        };
    }

    // 2. Swarm event.
    if event == Some(NamedEvent::Swarm) {
        return WavePlan {
            segments: vec![WaveSegment::new(EnemyType::Scuttler, 40, 15)],
            adaptation: LABEL_SWARM.to_string(),
            event,
            health_scale,
        };
    }

    // 3. Adaptive composition.
    let analysis = RosterAnalysis::analyze(towers, config);
    let (main, mut adaptation) = match analysis.profile() {
        DamageProfile::PhysicalHeavy => (EnemyType::Brute, LABEL_ARMOR.to_string()),
        DamageProfile::MagicHeavy => (EnemyType::Weaver, LABEL_ANTI_MAGIC.to_string()),
        DamageProfile::Balanced => (EnemyType::Grunt, LABEL_STANDARD.to_string()),
    };

    let mut segments = Vec::with_capacity(4);
    if event == Some(NamedEvent::MiniBoss) {
        segments.push(WaveSegment::new(EnemyType::Brute, 1, 120));
    }
    segments.push(WaveSegment::new(main, 4 + wave / 2, 60));

    if analysis.is_area_heavy() {
        // Spaced-out flankers.
        segments.push(WaveSegment::new(EnemyType::Thief, 3 + wave / 3, 100));
        adaptation.push_str(LABEL_FLANKERS);
    } else {
        segments.push(WaveSegment::new(EnemyType::Scuttler, 8 + wave, 20));
    }

    if wave > ELITE_AFTER_WAVE {
        segments.push(WaveSegment::new(EnemyType::Leech, 2 + wave / 5, 120));
    }

    WavePlan {
        segments,
        adaptation,
        event,
        health_scale,
    }
}
