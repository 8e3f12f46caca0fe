//! FLAK headless host.
//!
//! Wires the simulation engine to a real-time game loop thread, an input
//! autopilot and logging, and exposes the pieces the `flak` binary uses.

pub mod autopilot;
pub mod control;
pub mod game_loop;
pub mod headless;
pub mod logging;

pub use flak_core as core;
