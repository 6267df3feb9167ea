//! Status and damage resolver.
//!
//! [`apply_damage`] is the single entry point for elemental hits. Rules in
//! order:
//! 1. HEAVY armor halves PHYSICAL; MAGIC_RESIST halves everything else.
//! 2. Ethereal enemies take nothing from PHYSICAL.
//! 3. Weather scales the element.
//! 4. FIRE, POISON and ICE push a stacking status entry.
//! 5. Health drops by the result. Death is the caller's concern.

use aetherforge_core::components::{Enemy, StatusEffect};
use aetherforge_core::constants::*;
use aetherforge_core::enums::{ArmorClass, Element, WeatherType};

use super::weather;

/// Apply one hit to `enemy`. `secondary` only contributes its status.
pub fn apply_damage(
    enemy: &mut Enemy,
    raw: f32,
    element: Element,
    secondary: Option<Element>,
    weather: WeatherType,
) {
    let dmg = mitigated(enemy, raw, element) * weather::damage_factor(weather, element);

    if let Some(effect) = status_for(element) {
        enemy.effects.push(effect);
    }
    if let Some(effect) = secondary.and_then(status_for) {
        enemy.effects.push(effect);
    }

    enemy.health -= dmg;
}

/// Damage after armor and ethereal rules, before weather.
fn mitigated(enemy: &Enemy, raw: f32, element: Element) -> f32 {
    let physical = element == Element::Physical;
    let mut dmg = raw;
    match enemy.armor_class {
        ArmorClass::Heavy if physical => dmg *= 0.5,
        ArmorClass::MagicResist if !physical => dmg *= 0.5,
        _ => {}
    }
    if enemy.ethereal && physical {
        dmg = 0.0;
    }
    dmg
}

/// The status entry an element leaves behind, if any.
pub fn status_for(element: Element) -> Option<StatusEffect> {
    let (duration, magnitude) = match element {
        Element::Fire => (FIRE_DURATION, FIRE_MAGNITUDE),
        Element::Poison => (POISON_DURATION, POISON_MAGNITUDE),
        Element::Ice => (ICE_DURATION, ICE_MAGNITUDE),
        _ => return None,
    };
    Some(StatusEffect {
        element,
        duration,
        magnitude,
    })
}

/// Result of ticking an enemy's status list for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusTick {
    /// Compounded slow from every active ICE stack.
    pub speed_factor: f32,
    /// Summed FIRE and POISON magnitudes.
    pub damage_over_time: f32,
}

/// Decrement every effect, drop the expired ones and fold the rest.
pub fn tick_statuses(effects: &mut Vec<StatusEffect>) -> StatusTick {
    let mut tick = StatusTick {
        speed_factor: 1.0,
        damage_over_time: 0.0,
    };
    for effect in effects.iter_mut() {
        effect.duration = effect.duration.saturating_sub(1);
        match effect.element {
            Element::Ice => tick.speed_factor *= ICE_SLOW_FACTOR,
            Element::Fire | Element::Poison => tick.damage_over_time += effect.magnitude,
            _ => {}
        }
    }
    effects.retain(|e| e.duration > 0);
    tick
}
