//! The advice service contract and fallback resolution.

use thiserror::Error;

use crate::request::AdviceRequest;

pub const FALLBACK_OFFLINE: &str = "Aetherlink Offline: Neural conduit severed.";
pub const FALLBACK_EMPTY: &str = "Static received from command.";
pub const FALLBACK_DISRUPTED: &str = "Aetherlink disrupted.";

/// Why the service produced no advice.
#[derive(Debug, Error)]
pub enum AdviceError {
    /// No backend is configured or reachable.
    #[error("advice service unavailable")]
    Unavailable,
    /// The backend was reached but the call failed.
    #[error("advice request failed: {0}")]
    Failed(String),
}

/// An external text generator. Implementations may block; they are only
/// called from the advisor worker thread.
pub trait AdviceService: Send + 'static {
    fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError>;
}

/// Collapse a service result into display text. Never fails.
pub fn resolve(result: Result<String, AdviceError>) -> String {
    match result {
        Ok(text) if text.trim().is_empty() => FALLBACK_EMPTY.to_string(),
        Ok(text) => text,
        Err(AdviceError::Unavailable) => FALLBACK_OFFLINE.to_string(),
        Err(err) => {
            tracing::warn!(error = %err, "advice service failed");
            FALLBACK_DISRUPTED.to_string()
        }
    }
}

/// A service with no backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineService;

impl AdviceService for OfflineService {
    fn advise(&self, _request: &AdviceRequest) -> Result<String, AdviceError> {
        Err(AdviceError::Unavailable)
    }
}

/// Local rule-based advice keyed on the director's adaptation label.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedService;

impl AdviceService for ScriptedService {
    fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        let adaptation = request.adaptation.as_deref().unwrap_or_default();

        let order = if adaptation.starts_with("Boss") {
            "A titan approaches. Stack every cannon on the final bend and hold mana for the strike."
        } else if adaptation.starts_with("Overwhelming") {
            "They come as a tide. Resonators and chained lightning will break them."
        } else if adaptation.starts_with("Reinforced Armor") {
            "Their plating shrugs off shot. Infuse your towers and burn through it."
        } else if adaptation.starts_with("Anti-Magic") {
            "Their weavers drink arcane fire. Bring honest steel to bear."
        } else if request.towers.is_empty() {
            "The line stands empty, Artificer. Raise a cannon before they arrive."
        } else {
            "Hold the line and bank your gold. Interest favors the patient."
        };

        if adaptation.ends_with("Dispersed Flankers") {
            Ok(format!("{order} Watch the thieves on the flanks."))
        } else {
            Ok(order.to_string())
        }
    }
}
