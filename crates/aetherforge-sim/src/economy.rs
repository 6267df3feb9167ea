//! Prices and payouts.
//!
//! All gold arithmetic is done in `f64` and floored where the player sees a
//! price, so costs match the published tables exactly.

use aetherforge_core::config::{GameConfig, TowerSpec};
use aetherforge_core::constants::*;
use aetherforge_core::events::SimEvent;
use aetherforge_core::state::GameState;

/// Price of the next tower of `spec`'s archetype, given how many of that
/// archetype are already built.
pub fn tower_price(spec: &TowerSpec, cost_mod: f64, built: usize) -> f64 {
    (spec.cost * cost_mod * (1.0 + TOWER_COUNT_PRICE_STEP * built as f64)).floor()
}

/// Price to raise a tower from `level` to `level + 1`, or `None` at the cap.
pub fn upgrade_price(spec: &TowerSpec, level: u8, config: &GameConfig) -> Option<f64> {
    let factor = match level {
        1 => config.upgrades.level_2,
        2 => config.upgrades.level_3,
        _ => return None,
    };
    Some((spec.cost * factor).floor())
}

pub fn infusion_price(spec: &TowerSpec, config: &GameConfig) -> f64 {
    (spec.cost * config.upgrades.infusion).floor()
}

/// Interest on `gold`, capped.
pub fn interest(gold: f64) -> f64 {
    (gold * INTEREST_RATE).min(INTEREST_CAP)
}

/// Wave-clear income for the wave number reached after the clear.
pub fn wave_income(wave: u32, gold_mod: f64) -> f64 {
    (WAVE_CLEAR_BASE_GOLD + WAVE_CLEAR_GOLD_PER_WAVE * wave as f64) * gold_mod
}

/// Gold after a clear: `floor(G + (100 + 15W)·M + min(0.03G, 200))`.
pub fn wave_clear_gold(gold: f64, wave: u32, gold_mod: f64) -> f64 {
    (gold + wave_income(wave, gold_mod) + interest(gold)).floor()
}

/// Close out the current wave: pause, advance the counter, pay out and
/// reset the spawn schedule.
pub fn complete_wave(state: &mut GameState, config: &GameConfig) {
    let gold_mod = config.difficulty(state.difficulty).map_or(1.0, |d| d.gold_mod);

    state.is_playing = false;
    state.wave += 1;

    let before = state.money;
    let income = wave_income(state.wave, gold_mod);
    let interest = interest(before);
    state.money = wave_clear_gold(before, state.wave, gold_mod);
    state.mana = (state.mana + WAVE_CLEAR_MANA).min(state.max_mana);
    state.spawned_in_wave = 0;
    state.spawn_timer = 0;

    state.events.push(SimEvent::WaveCleared {
        wave: state.wave,
        income,
        interest,
    });
    tracing::info!(
        wave = state.wave,
        income,
        interest,
        money = state.money,
        "wave cleared"
    );
}
