//! Core types and definitions for the Aetherforge simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity records, commands, the game state aggregate, events, static
//! configuration tables and constants. It has no dependency on any
//! runtime, renderer or host.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
