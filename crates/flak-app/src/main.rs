use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use flak_app::autopilot::Autopilot;
use flak_app::control::GameLoopHandle;
use flak_app::{headless, logging};
use flak_core::commands::PlayerCommand;
use flak_core::enums::SessionPhase;
use flak_core::state::StatsSnapshot;
use flak_sim::{GameConfig, SimConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Normal,
    Intensified,
    Practice,
}

impl Mode {
    fn start_command(self) -> PlayerCommand {
        match self {
            Mode::Normal => PlayerCommand::StartNormal,
            Mode::Intensified => PlayerCommand::StartIntensified,
            Mode::Practice => PlayerCommand::StartPractice,
        }
    }
}

/// Anti-aircraft turret simulation with an autopilot gunner
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session mode to play
    #[arg(short, long, value_enum, default_value_t = Mode::Normal)]
    mode: Mode,

    /// RNG seed; the same seed replays the same session
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// TOML file overriding gameplay tunables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many seconds (defaults to the session length, or 60s for practice)
    #[arg(long)]
    seconds: Option<f64>,

    /// Run on the wall clock in a game loop thread instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Print the final stats as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let game = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let seconds = args.seconds.unwrap_or(match args.mode {
        Mode::Practice => 60.0,
        Mode::Normal | Mode::Intensified => game.session_secs + 1.0,
    });
    let config = SimConfig {
        seed: args.seed,
        game,
    };

    let stats = if args.realtime {
        run_realtime(config, args.mode.start_command(), seconds)?
    } else {
        headless::run_session(config, args.mode.start_command(), seconds)?.final_stats
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_result(&stats);
    }
    Ok(())
}

/// Drive the threaded game loop on the wall clock, polling stats until the
/// session ends or `seconds` pass.
fn run_realtime(config: SimConfig, start: PlayerCommand, seconds: f64) -> Result<StatsSnapshot> {
    let handle = GameLoopHandle::start(config, Some(Box::new(Autopilot::new())))?;
    handle.send_command(start)?;

    let deadline = Instant::now() + Duration::from_secs_f64(seconds.max(0.0));
    let mut last = StatsSnapshot::default();
    while Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(250));
        if let Some(stats) = handle.stats()? {
            if stats.tick / 60 != last.tick / 60 {
                info!(
                    "score {} | destroyed {} | {:.0}s left",
                    stats.score, stats.enemies_destroyed, stats.time_remaining_secs
                );
            }
            let ended = stats.phase == SessionPhase::Ended;
            last = stats;
            if ended {
                break;
            }
        }
    }

    handle.shutdown()?;
    Ok(last)
}

fn print_result(stats: &StatsSnapshot) {
    println!("mode:      {:?}", stats.mode);
    println!("score:     {}", stats.score);
    println!("destroyed: {}", stats.enemies_destroyed);
    if stats.targets_total > 0 {
        println!("targets:   {}/{}", stats.targets_hit, stats.targets_total);
    }
    if let Some(rank) = stats.rank {
        println!("result:    {}", rank.message());
    }
}
