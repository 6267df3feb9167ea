//! Aetherforge host.
//!
//! Wires the simulation crates into a real-time game loop thread, a small
//! control surface over it, and a scripted session used by the CLI.

pub mod demo;
pub mod game_loop;
pub mod host;
pub mod logging;

pub use aetherforge_core as core;
