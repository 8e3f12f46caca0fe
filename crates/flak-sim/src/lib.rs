//! Simulation engine for FLAK.
//!
//! Owns the hecs entity store, runs systems once per frame, drives the
//! physics and rendering collaborators through traits, and produces
//! `StatsSnapshot`s for the HUD.

pub mod config;
pub mod difficulty;
pub mod effects;
pub mod engine;
pub mod error;
pub mod physics;
pub mod render;
pub mod session;
pub mod store;
pub mod systems;
pub mod turret;
pub mod world_setup;

pub use config::{GameConfig, SimConfig};
pub use engine::SimulationEngine;
pub use flak_core as core;

#[cfg(test)]
mod tests;
