//! Strategic advice for Aetherforge.
//!
//! Defines the contract with the external advice service: the request
//! summary, the [`AdviceService`] trait, fallback resolution, and a worker
//! thread that keeps service calls off the frame loop.

pub mod request;
pub mod service;
pub mod worker;

pub use request::{AdviceRequest, TowerSummary};
pub use service::{resolve, AdviceError, AdviceService, OfflineService, ScriptedService};
pub use worker::Advisor;
