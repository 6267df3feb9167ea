//! Simulation engine for Aetherforge.
//!
//! Owns the game state, runs the per-frame systems pipeline and applies
//! player commands. Completely headless.

pub mod commands;
pub mod economy;
pub mod engine;
pub mod systems;

pub use aetherforge_core as core;
pub use engine::{SimConfig, SimulationEngine};
