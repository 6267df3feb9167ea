//! Adaptive wave director for Aetherforge.
//!
//! Analyzes the player's tower roster and composes the next wave's spawn
//! schedule together with a narrative adaptation label. Pure functions over
//! plain data; no simulation dependency.

pub mod composer;
pub mod events;
pub mod roster;

pub use aetherforge_core as core;
pub use composer::{generate_wave, WavePlan, WaveSegment};

#[cfg(test)]
mod tests;
