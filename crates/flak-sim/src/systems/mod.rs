//! Per-tick systems run by the engine.
//!
//! Systems are free functions over the entity store and the collaborators.
//! They hold no state of their own; the engine passes in whatever they need.

pub mod collision;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod spawner;
