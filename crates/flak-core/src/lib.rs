//! Core types and definitions for the FLAK turret simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, stats snapshots, events, and constants.
//! It has no dependency on a renderer, physics engine, or runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

pub use glam::Vec3;
