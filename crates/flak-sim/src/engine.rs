//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the entity store, the session, the turret and the
//! spawn schedule, processes mode commands, runs every system in a fixed
//! order and produces `StatsSnapshot`s. Physics and rendering are reached
//! only through the [`PhysicsWorld`] and [`RenderSink`] traits, so the
//! engine runs headless and deterministically under test.

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use flak_core::commands::PlayerCommand;
use flak_core::enums::{GameMode, SessionPhase};
use flak_core::events::GameEvent;
use flak_core::state::StatsSnapshot;
use flak_core::types::{EntityId, InputState};

use crate::config::{GameConfig, SimConfig};
use crate::physics::{BallisticWorld, PhysicsWorld};
use crate::render::{NullRenderer, RenderSink};
use crate::session::SessionState;
use crate::store::EntityStore;
use crate::systems;
use crate::systems::spawner::SpawnSchedule;
use crate::turret::Turret;
use crate::world_setup;

/// The simulation engine. Owns all sim state and both collaborators.
pub struct SimulationEngine<P = BallisticWorld, R = NullRenderer>
where
    P: PhysicsWorld,
    R: RenderSink,
{
    config: GameConfig,
    physics: P,
    renderer: R,
    store: EntityStore,
    session: SessionState,
    turret: Turret,
    schedule: SpawnSchedule,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
    /// Fire key state seen on the previous tick; shots fire on the rising edge.
    fire_latch: bool,
    last_frame: Option<Duration>,
    tick_count: u64,
    cull_buffer: Vec<EntityId>,
    despawn_buffer: Vec<EntityId>,
}

impl SimulationEngine {
    /// Engine with the built-in ballistic physics and no renderer.
    pub fn new(config: SimConfig) -> Self {
        let physics = BallisticWorld::new(config.game.gravity_vector());
        Self::with_backends(config, physics, NullRenderer)
    }
}

impl<P: PhysicsWorld, R: RenderSink> SimulationEngine<P, R> {
    /// Engine driving caller-supplied physics and render collaborators.
    pub fn with_backends(config: SimConfig, physics: P, renderer: R) -> Self {
        let turret = Turret::initial(&config.game);
        Self {
            physics,
            renderer,
            store: EntityStore::new(),
            session: SessionState::idle(),
            turret,
            schedule: SpawnSchedule::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            fire_latch: false,
            last_frame: None,
            tick_count: 0,
            cull_buffer: Vec::new(),
            despawn_buffer: Vec::new(),
            config: config.game,
        }
    }

    /// Queue a mode command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Run one frame at clock reading `now` with the keys held in `input`.
    ///
    /// Queued commands are applied first. The world only advances while a
    /// session is Playing; in Idle and Ended the tick just reports stats.
    pub fn tick(&mut self, now: Duration, input: &InputState) -> StatsSnapshot {
        self.tick_count += 1;
        let frame_delta = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_frame = Some(now);

        self.process_commands(now);

        if self.session.is_running() {
            self.run_systems(now, frame_delta, input);
        }
        self.fire_latch = input.fire;
        trace!(
            "tick {} {:?}: {} events",
            self.tick_count,
            self.session.phase(),
            self.events.len()
        );

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            self.tick_count,
            &self.store,
            &self.session,
            &self.turret,
            &self.config,
            events,
        )
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn turret(&self) -> &Turret {
        &self.turret
    }

    pub fn schedule(&self) -> &SpawnSchedule {
        &self.schedule
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Place an enemy at a chosen spot (for tests needing a known target).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, position: glam::Vec3) -> EntityId {
        world_setup::insert_enemy(
            &mut self.store,
            &mut self.renderer,
            flak_core::components::Enemy {
                position,
                velocity: glam::Vec3::ZERO,
                radius: self.config.enemy_radius,
                hp: self.config.enemy_hp,
            },
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self, now: Duration) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, now);
        }
    }

    /// Handle a single mode command.
    fn handle_command(&mut self, command: PlayerCommand, now: Duration) {
        match command.target_mode() {
            Some(mode) => self.start_session(mode, now),
            None => {
                if self.session.phase() == SessionPhase::Idle {
                    debug!("exit ignored while idle");
                    return;
                }
                world_setup::clear_world(&mut self.store, &mut self.physics, &mut self.renderer);
                self.session = SessionState::idle();
                self.schedule = SpawnSchedule::default();
                self.events.push(GameEvent::SessionExited);
                info!("session exited");
            }
        }
    }

    /// Enter Playing in `mode`. Anything left from a previous session,
    /// including pending burst spawns, is discarded.
    fn start_session(&mut self, mode: GameMode, now: Duration) {
        world_setup::clear_world(&mut self.store, &mut self.physics, &mut self.renderer);
        self.session = SessionState::start(mode, now);
        self.schedule = SpawnSchedule::for_session(mode, now, &self.config, &mut self.rng);
        self.turret = Turret::initial(&self.config);
        if mode == GameMode::Practice {
            world_setup::spawn_practice_targets(&mut self.store, &mut self.renderer, &self.config);
        }
        self.events.push(GameEvent::SessionStarted { mode });
        info!(
            "{mode:?} session started (burst of {})",
            self.schedule.pending_burst()
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self, now: Duration, frame_delta: Duration, input: &InputState) {
        // 1. Physics step (fixed, independent of frame delta)
        self.physics.step_simulation(self.config.physics_step_secs);

        // 2. Turret pose and fire
        self.turret.apply_input(input, &self.config);
        if input.fire && !self.fire_latch {
            self.fire(now);
        }

        // 3. Enemy drift + out-of-bounds cull
        systems::movement::run(
            &mut self.store,
            &mut self.renderer,
            frame_delta.as_secs_f32(),
            &self.config,
            &mut self.cull_buffer,
        );

        // 4. Projectile sync + expiry/ground cull
        systems::projectiles::run(
            &mut self.store,
            &mut self.physics,
            &mut self.renderer,
            now,
            &self.config,
            &mut self.events,
        );

        // 5. Collision resolution
        let with_targets = self.session.mode() == GameMode::Practice;
        systems::collision::run(
            &mut self.store,
            &mut self.physics,
            &mut self.renderer,
            &mut self.session,
            with_targets,
            &self.config,
            &mut self.events,
            &mut self.despawn_buffer,
        );

        // 6. Timer, then spawning while still playing
        if !self.session.mode().is_timed() {
            return;
        }
        let total = self.config.session_duration();
        self.session.update_elapsed(now);
        if self.session.end_if_expired(total) {
            self.schedule = SpawnSchedule::default();
            if let Some(rank) = self.session.rank() {
                self.events.push(GameEvent::SessionEnded {
                    score: self.session.score(),
                    enemies_destroyed: self.session.enemies_destroyed(),
                    rank,
                });
                info!(
                    "session ended: score {}, destroyed {}, {:?}",
                    self.session.score(),
                    self.session.enemies_destroyed(),
                    rank
                );
            }
            return;
        }
        let progress = self.session.progress(total);
        systems::spawner::run_burst(
            &mut self.store,
            &mut self.renderer,
            &mut self.rng,
            &mut self.schedule,
            now,
            progress,
            &self.config,
            &mut self.events,
        );
        systems::spawner::maybe_spawn(
            &mut self.store,
            &mut self.renderer,
            &mut self.rng,
            &mut self.schedule,
            now,
            progress,
            &self.config,
            &mut self.events,
        );
    }

    fn fire(&mut self, now: Duration) {
        let origin = self.turret.muzzle(&self.config);
        let direction = self.turret.direction();
        let (id, _projectile) = systems::projectiles::fire(
            &mut self.store,
            &mut self.physics,
            &mut self.renderer,
            origin,
            direction,
            self.config.projectile_speed,
            now,
            &self.config,
        );
        self.events.push(GameEvent::ProjectileFired {
            id,
            origin,
            direction,
        });
        self.events.push(GameEvent::MuzzleFlash { position: origin });
        trace!("projectile {id:?} fired from {origin:?} along {direction:?}");
    }
}
