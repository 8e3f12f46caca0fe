//! Control surface for a running game loop.
//!
//! A [`GameLoopHandle`] owns the command channel, the latest-stats slot and
//! the loop thread itself. Dropping it stops the loop.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{anyhow, Context, Result};
use log::warn;

use flak_core::commands::PlayerCommand;
use flak_core::state::StatsSnapshot;
use flak_core::types::InputState;
use flak_sim::SimConfig;

use crate::game_loop::{self, GameLoopCommand, InputDriver};

pub struct GameLoopHandle {
    command_tx: mpsc::Sender<GameLoopCommand>,
    latest_stats: Arc<Mutex<Option<StatsSnapshot>>>,
    /// `None` once joined.
    thread: Option<JoinHandle<()>>,
}

impl GameLoopHandle {
    /// Spawn the game loop thread.
    pub fn start(config: SimConfig, driver: Option<Box<dyn InputDriver + Send>>) -> Result<Self> {
        let latest_stats = Arc::new(Mutex::new(None));
        let (command_tx, thread) =
            game_loop::spawn_game_loop(config, latest_stats.clone(), driver)
                .context("failed to spawn game loop thread")?;
        Ok(Self {
            command_tx,
            latest_stats,
            thread: Some(thread),
        })
    }

    /// Forward a mode command to the simulation.
    pub fn send_command(&self, command: PlayerCommand) -> Result<()> {
        self.send(GameLoopCommand::Player(command))
    }

    /// Replace the held keys used from the next tick on.
    pub fn send_input(&self, input: InputState) -> Result<()> {
        self.send(GameLoopCommand::Input(input))
    }

    /// Stats from the most recent tick, `None` before the first tick.
    pub fn stats(&self) -> Result<Option<StatsSnapshot>> {
        let lock = self.latest_stats.lock().map_err(|e| anyhow!("{e}"))?;
        Ok(lock.clone())
    }

    /// Stop the loop and wait for its thread to finish.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        // The loop may already have exited on its own.
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        thread
            .join()
            .map_err(|_| anyhow!("game loop thread panicked"))
    }

    fn send(&self, command: GameLoopCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|e| anyhow!("game loop is not running: {e}"))
    }
}

impl Drop for GameLoopHandle {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!("{err}");
        }
    }
}
