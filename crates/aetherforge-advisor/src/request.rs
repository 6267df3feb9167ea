//! The advice request summary and its prompt rendering.

use serde::{Deserialize, Serialize};

use aetherforge_core::config::GameConfig;
use aetherforge_core::enums::Element;
use aetherforge_core::state::GameState;

/// One tower in the roster summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerSummary {
    pub name: String,
    pub level: u8,
    pub infusion: Option<Element>,
}

/// Everything the advice service is told about the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub map_name: String,
    pub theme: String,
    pub modifiers: Vec<String>,
    pub adaptation: Option<String>,
    pub event: Option<String>,
    pub wave: u32,
    pub gold: u64,
    pub mana: u32,
    pub towers: Vec<TowerSummary>,
}

impl AdviceRequest {
    /// Summarize the current run.
    pub fn from_state(state: &GameState, config: &GameConfig) -> Self {
        let map = config.map(state.map);
        let towers = state
            .towers
            .iter()
            .map(|t| TowerSummary {
                name: config
                    .tower(t.kind)
                    .map_or_else(|| format!("{:?}", t.kind), |spec| spec.name.clone()),
                level: t.level,
                infusion: t.infusion,
            })
            .collect();

        Self {
            map_name: map.map_or_else(|| format!("{:?}", state.map), |m| m.name.clone()),
            theme: map.map(|m| m.theme.clone()).unwrap_or_default(),
            modifiers: map.map(|m| m.modifiers.clone()).unwrap_or_default(),
            adaptation: state.adaptation.clone(),
            event: state.active_event.clone(),
            wave: state.wave,
            gold: state.money.max(0.0).floor() as u64,
            mana: state.mana.max(0.0).floor() as u32,
            towers,
        }
    }

    /// Roster as a single line, `"Empty"` when no towers stand.
    pub fn roster_line(&self) -> String {
        if self.towers.is_empty() {
            return "Empty".to_string();
        }
        self.towers
            .iter()
            .map(|t| match t.infusion {
                Some(el) => format!("{} Lvl{} [{}]", t.name, t.level, element_name(el)),
                None => format!("{} Lvl{}", t.name, t.level),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Natural-language prompt for a text-generation backend.
    pub fn prompt(&self) -> String {
        format!(
            "You are the High Artificer of the Aetherforge.\n\
             \n\
             Mission Context:\n\
             - Map: {} ({})\n\
             - Modifiers: {}\n\
             - Threat Analysis: {}\n\
             - Active Event: {}\n\
             \n\
             Status:\n\
             - Wave: {}\n\
             - Gold: {}\n\
             - Mana: {}\n\
             - Defense: {}\n\
             \n\
             The enemy Conductor is adapting to the player's build.\n\
             Give a short, punchy tactical order (max 2 sentences) in a Steampunk Commander persona.\n\
             Focus on countering the specific adaptive threat or map hazard.",
            self.map_name,
            self.theme,
            self.modifiers.join(", "),
            self.adaptation.as_deref().unwrap_or("Analyzing..."),
            self.event.as_deref().unwrap_or("None"),
            self.wave,
            self.gold,
            self.mana,
            self.roster_line(),
        )
    }
}

/// Wire name of an element, as the service sees it.
fn element_name(element: Element) -> String {
    serde_json::to_value(element)
        .ok()
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_else(|| format!("{element:?}"))
}
