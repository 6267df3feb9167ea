//! Named wave events, keyed by fixed wave numbers.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NamedEvent {
    /// An armored alpha leads the wave.
    MiniBoss,
    /// A mass of chaff replaces the adaptive composition.
    Swarm,
    Silence,
    Boss,
}

impl NamedEvent {
    /// Direct lookup; roster analysis plays no part.
    pub fn for_wave(wave: u32) -> Option<Self> {
        match wave {
            5 => Some(Self::MiniBoss),
            10 => Some(Self::Swarm),
            15 => Some(Self::Silence),
            20 => Some(Self::Boss),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MiniBoss => "Mini-Boss: Brute Alpha",
            Self::Swarm => "Swarm",
            Self::Silence => "Silence Wave",
            Self::Boss => "BOSS: The Amalgamation",
        }
    }
}
