//! Construction and ability commands.
//!
//! Every handler checks all of its preconditions before touching state, so
//! a rejected command leaves the state exactly as it was. The engine logs
//! rejections and drops them; nothing propagates to the host.

use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use aetherforge_core::components::Tower;
use aetherforge_core::config::{GameConfig, TowerSpec};
use aetherforge_core::constants::*;
use aetherforge_core::enums::*;
use aetherforge_core::events::SimEvent;
use aetherforge_core::state::GameState;
use aetherforge_core::types::GridCell;

use crate::economy;
use crate::systems::{enemies, particles, EntityIds};

/// Why a player command was a no-op.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandRejection {
    #[error("no run in progress")]
    NoActiveRun,
    #[error("cell ({}, {}) is outside the grid", .0.col, .0.row)]
    OutOfBounds(GridCell),
    #[error("cell ({}, {}) lies on an enemy path", .0.col, .0.row)]
    OnPath(GridCell),
    #[error("insufficient gold: need {needed}, have {available}")]
    InsufficientGold { needed: f64, available: f64 },
    #[error("insufficient mana: need {needed}, have {available}")]
    InsufficientMana { needed: f32, available: f32 },
    #[error("no tower with id {0}")]
    UnknownTower(u32),
    #[error("tower {0} is already at max level")]
    MaxLevel(u32),
    #[error("tower {0} is already infused")]
    AlreadyInfused(u32),
    #[error("tower {0} must reach level 2 before infusion")]
    InfusionLocked(u32),
    #[error("{element:?} is not an allowed infusion for {kind:?}")]
    InfusionNotAllowed { kind: TowerType, element: Element },
    #[error("tower {0} has no free module slot")]
    ModuleSlotsFull(u32),
    #[error("tower {tower_id} already carries {module:?}")]
    DuplicateModule { tower_id: u32, module: ModuleId },
    #[error("configuration has no entry for {0}")]
    MissingConfig(String),
}

type Result<T> = std::result::Result<T, CommandRejection>;

fn require_run(state: &GameState) -> Result<()> {
    if state.is_active() {
        Ok(())
    } else {
        Err(CommandRejection::NoActiveRun)
    }
}

fn require_gold(state: &GameState, needed: f64) -> Result<()> {
    if state.money >= needed {
        Ok(())
    } else {
        Err(CommandRejection::InsufficientGold {
            needed,
            available: state.money,
        })
    }
}

fn require_mana(state: &GameState, needed: f32) -> Result<()> {
    if state.mana >= needed {
        Ok(())
    } else {
        Err(CommandRejection::InsufficientMana {
            needed,
            available: state.mana,
        })
    }
}

fn tower_spec(config: &GameConfig, kind: TowerType) -> Result<&TowerSpec> {
    config
        .tower(kind)
        .ok_or_else(|| CommandRejection::MissingConfig(format!("tower {kind:?}")))
}

fn find_tower(state: &GameState, tower_id: u32) -> Result<&Tower> {
    state
        .tower(tower_id)
        .ok_or(CommandRejection::UnknownTower(tower_id))
}

/// Build a tower of `kind` on `cell`. Targeting an occupied cell selects
/// the tower standing there instead.
pub fn place_tower(
    state: &mut GameState,
    config: &GameConfig,
    ids: &mut EntityIds,
    rng: &mut ChaCha8Rng,
    kind: TowerType,
    cell: GridCell,
) -> Result<()> {
    require_run(state)?;
    if let Some(existing) = state.towers.iter().find(|t| t.cell == cell) {
        state.selected_tower = Some(existing.id);
        return Ok(());
    }
    if !cell.in_bounds() {
        return Err(CommandRejection::OutOfBounds(cell));
    }
    let map = config
        .map(state.map)
        .ok_or_else(|| CommandRejection::MissingConfig(format!("map {:?}", state.map)))?;
    if map.is_path_cell(cell) {
        return Err(CommandRejection::OnPath(cell));
    }
    let spec = tower_spec(config, kind)?;
    let cost_mod = config.difficulty(state.difficulty).map_or(1.0, |d| d.cost_mod);
    let cost = economy::tower_price(spec, cost_mod, state.tower_count(kind));
    require_gold(state, cost)?;

    state.money -= cost;
    let id = ids.next();
    let position = cell.center();
    state.towers.push(Tower {
        id,
        kind,
        cell,
        position,
        cooldown: 0.0,
        level: 1,
        infusion: None,
        modules: Vec::new(),
        ability_cooldown: 0,
        malfunction: None,
    });
    state.selected_tower = None;
    particles::spawn_burst(&mut state.particles, ids, rng, position, &spec.color, 20, 1.0);
    state.events.push(SimEvent::TowerPlaced {
        tower_id: id,
        kind,
        cost,
    });
    Ok(())
}

/// Select a tower, or clear the selection with `None`.
pub fn select_tower(state: &mut GameState, tower_id: Option<u32>) -> Result<()> {
    if let Some(id) = tower_id {
        find_tower(state, id)?;
    }
    state.selected_tower = tower_id;
    Ok(())
}

pub fn upgrade_tower(state: &mut GameState, config: &GameConfig, tower_id: u32) -> Result<()> {
    require_run(state)?;
    let tower = find_tower(state, tower_id)?;
    if tower.level >= MAX_TOWER_LEVEL {
        return Err(CommandRejection::MaxLevel(tower_id));
    }
    let spec = tower_spec(config, tower.kind)?;
    let cost = economy::upgrade_price(spec, tower.level, config)
        .ok_or(CommandRejection::MaxLevel(tower_id))?;
    let level = tower.level + 1;
    require_gold(state, cost)?;

    state.money -= cost;
    if let Some(tower) = state.tower_mut(tower_id) {
        tower.level = level;
    }
    state.events.push(SimEvent::TowerUpgraded {
        tower_id,
        level,
        cost,
    });
    Ok(())
}

pub fn infuse_tower(
    state: &mut GameState,
    config: &GameConfig,
    tower_id: u32,
    element: Element,
) -> Result<()> {
    require_run(state)?;
    let tower = find_tower(state, tower_id)?;
    if tower.infusion.is_some() {
        return Err(CommandRejection::AlreadyInfused(tower_id));
    }
    if tower.level < 2 {
        return Err(CommandRejection::InfusionLocked(tower_id));
    }
    let spec = tower_spec(config, tower.kind)?;
    if !spec.allowed_infusions.contains(&element) {
        return Err(CommandRejection::InfusionNotAllowed {
            kind: tower.kind,
            element,
        });
    }
    let cost = economy::infusion_price(spec, config);
    require_gold(state, cost)?;

    state.money -= cost;
    if let Some(tower) = state.tower_mut(tower_id) {
        tower.infusion = Some(element);
    }
    state.events.push(SimEvent::TowerInfused {
        tower_id,
        element,
        cost,
    });
    Ok(())
}

pub fn install_module(
    state: &mut GameState,
    config: &GameConfig,
    tower_id: u32,
    module: ModuleId,
) -> Result<()> {
    require_run(state)?;
    let tower = find_tower(state, tower_id)?;
    if tower.has_module(module) {
        return Err(CommandRejection::DuplicateModule { tower_id, module });
    }
    if tower.modules.len() >= MAX_MODULES {
        return Err(CommandRejection::ModuleSlotsFull(tower_id));
    }
    let cost = config
        .module(module)
        .map(|m| m.cost)
        .ok_or_else(|| CommandRejection::MissingConfig(format!("module {module:?}")))?;
    require_gold(state, cost)?;

    state.money -= cost;
    if let Some(tower) = state.tower_mut(tower_id) {
        tower.modules.push(module);
    }
    state.events.push(SimEvent::ModuleInstalled {
        tower_id,
        module,
        cost,
    });
    Ok(())
}

/// Spend mana on one of the three instant abilities.
pub fn use_ability(
    state: &mut GameState,
    config: &GameConfig,
    ids: &mut EntityIds,
    rng: &mut ChaCha8Rng,
    ability: Ability,
) -> Result<()> {
    require_run(state)?;
    match ability {
        Ability::Repair => {
            require_mana(state, REPAIR_COST)?;
            state.mana -= REPAIR_COST;
            state.lives = (state.lives + REPAIR_LIVES).min(MAX_LIVES);
        }
        Ability::Overdrive => {
            require_mana(state, OVERDRIVE_COST)?;
            state.mana -= OVERDRIVE_COST;
            for tower in &mut state.towers {
                tower.cooldown = 0.0;
            }
        }
        Ability::Nuke => {
            require_mana(state, NUKE_COST)?;
            state.mana -= NUKE_COST;
            for enemy in &mut state.enemies {
                enemy.health -= NUKE_DAMAGE;
            }
            enemies::cull_dead(state, config, ids, rng);
        }
    }
    state.events.push(SimEvent::AbilityUsed { ability });
    Ok(())
}
