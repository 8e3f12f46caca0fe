//! Mode commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::GameMode;

/// All session-level player actions. Per-tick key states travel separately
/// as [`crate::types::InputState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start (or restart) a timed session with the normal profile.
    StartNormal,
    /// Start (or restart) a timed session with the intensified profile.
    StartIntensified,
    /// Start an untimed practice session against static targets.
    StartPractice,
    /// Abort the current session and return to idle.
    Exit,
}

impl PlayerCommand {
    /// The mode a start command enters, `None` for `Exit`.
    pub fn target_mode(self) -> Option<GameMode> {
        match self {
            PlayerCommand::StartNormal => Some(GameMode::Normal),
            PlayerCommand::StartIntensified => Some(GameMode::Intensified),
            PlayerCommand::StartPractice => Some(GameMode::Practice),
            PlayerCommand::Exit => None,
        }
    }
}
