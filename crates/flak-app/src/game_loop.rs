//! Game loop thread: runs the simulation engine at 60Hz and publishes stats.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Stats from every tick are stored in
//! shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info};

use flak_core::commands::PlayerCommand;
use flak_core::constants::TICK_RATE;
use flak_core::state::StatsSnapshot;
use flak_core::types::InputState;
use flak_sim::{SimConfig, SimulationEngine};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Messages sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Mode command forwarded to the engine.
    Player(PlayerCommand),
    /// Held keys for subsequent ticks. Ignored while a driver is installed.
    Input(InputState),
    Shutdown,
}

/// Produces the held keys for the next tick from the current engine state.
///
/// When a driver is installed it replaces input sent over the channel.
pub trait InputDriver {
    fn next_input(&mut self, engine: &SimulationEngine) -> InputState;
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender used to talk to it and the thread's handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_stats: Arc<Mutex<Option<StatsSnapshot>>>,
    driver: Option<Box<dyn InputDriver + Send>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let thread = std::thread::Builder::new()
        .name("flak-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_stats, driver);
        })?;

    Ok((cmd_tx, thread))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_stats: &Mutex<Option<StatsSnapshot>>,
    mut driver: Option<Box<dyn InputDriver + Send>>,
) {
    let mut engine = SimulationEngine::new(config);
    let clock = Instant::now();
    let mut next_tick_time = clock;
    let mut input = InputState::default();
    info!("game loop started at {TICK_RATE} Hz");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Input(keys)) => input = keys,
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick on the wall clock
        if let Some(driver) = driver.as_mut() {
            input = driver.next_input(&engine);
        }
        let stats = engine.tick(clock.elapsed(), &input);

        // 3. Store latest stats for polling
        if let Ok(mut lock) = latest_stats.lock() {
            *lock = Some(stats);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset instead of catching up
            debug!("game loop fell behind by {:?}", now - next_tick_time);
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flak_core::enums::SessionPhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Player(PlayerCommand::StartNormal))
            .unwrap();
        tx.send(GameLoopCommand::Input(InputState::firing())).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Player(PlayerCommand::StartNormal)
        ));
        assert!(matches!(commands[1], GameLoopCommand::Input(keys) if keys.fire));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        assert_eq!(TICK_DURATION.as_nanos(), 1_000_000_000u128 / 60);
    }

    #[test]
    fn test_loop_publishes_stats_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, thread) = spawn_game_loop(SimConfig::default(), latest.clone(), None).unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::StartPractice))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut playing = false;
        while Instant::now() < deadline {
            if let Some(stats) = latest.lock().unwrap().as_ref() {
                if stats.phase == SessionPhase::Playing {
                    assert_eq!(stats.targets_total, 8);
                    playing = true;
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(playing, "loop should pick up the start command");

        tx.send(GameLoopCommand::Shutdown).unwrap();
        thread.join().unwrap();
    }
}
