//! Simulation constants and tuning parameters.
//!
//! These are the authoritative defaults. `flak_sim::config::GameConfig`
//! mirrors every value here and may override them at runtime.

/// Physics tick rate (Hz). One physics step per frame, independent of frame delta.
pub const TICK_RATE: u32 = 60;

/// Seconds per physics step.
pub const PHYSICS_STEP: f32 = 1.0 / TICK_RATE as f32;

/// Frames per second the enemy drift velocities are expressed in.
pub const DRIFT_FRAME_RATE: f32 = 60.0;

/// Largest frame delta (seconds) applied to enemy drift in one tick.
pub const MAX_FRAME_DELTA_SECS: f32 = 0.25;

/// Gravity along +y (m/s²).
pub const GRAVITY: f32 = -9.8;

// --- Session ---

/// Length of a timed session (Normal / Intensified) in seconds.
pub const SESSION_SECS: f64 = 60.0;

// --- Turret ---

/// Azimuth change per tick while a rotate key is held (radians).
pub const TURRET_ROTATION_SPEED: f32 = 0.02;

/// Elevation change per tick while an elevate key is held (radians).
pub const TURRET_ELEVATION_SPEED: f32 = 0.02;

/// Lowest barrel elevation (radians).
pub const TURRET_ELEVATION_MIN: f32 = 0.0;

/// Highest barrel elevation (radians).
pub const TURRET_ELEVATION_MAX: f32 = std::f32::consts::FRAC_PI_3;

/// Elevation the turret is reset to on session start.
pub const TURRET_INITIAL_ELEVATION: f32 = 0.3;

/// Distance from the turret pivot to the muzzle along the barrel.
pub const MUZZLE_DISTANCE: f32 = 2.0;

/// Height of the turret pivot above ground.
pub const PIVOT_HEIGHT: f32 = 1.8;

// --- Projectiles ---

/// Muzzle speed (m/s).
pub const PROJECTILE_SPEED: f32 = 50.0;

/// Lifetime before silent expiry (milliseconds).
pub const PROJECTILE_LIFETIME_MS: u64 = 5000;

/// Collision radius of a projectile.
pub const PROJECTILE_RADIUS: f32 = 1.0;

// --- Enemies ---

/// Horizontal drift scale; x/z velocity is `(u - 0.5) * ENEMY_BASE_SPEED`.
pub const ENEMY_BASE_SPEED: f32 = 0.3;

/// Vertical drift scale; y velocity is `(u - 0.5) * ENEMY_VERTICAL_SPEED`.
pub const ENEMY_VERTICAL_SPEED: f32 = 0.3;

pub const ENEMY_RADIUS: f32 = 1.0;
pub const ENEMY_HP: u32 = 1;

/// Horizontal spawn distance from origin, `[min, max)`.
pub const SPAWN_DISTANCE_MIN: f32 = 40.0;
pub const SPAWN_DISTANCE_MAX: f32 = 70.0;

/// Spawn height, `[min, max)`.
pub const SPAWN_HEIGHT_MIN: f32 = 10.0;
pub const SPAWN_HEIGHT_MAX: f32 = 30.0;

// --- World bounds ---

/// Enemies with |x| or |z| beyond this are culled.
pub const BOUNDS_HALF_EXTENT: f32 = 100.0;

/// Enemies below this height are culled.
pub const BOUNDS_FLOOR: f32 = 0.0;

/// Enemies above this height are culled.
pub const BOUNDS_CEILING: f32 = 50.0;

// --- Scoring ---

pub const ENEMY_SCORE: u32 = 100;
pub const TARGET_SCORE: u32 = 50;

// --- Difficulty: normal ---

pub const NORMAL_SPAWN_INTERVAL_INITIAL_MS: u64 = 2000;
pub const NORMAL_SPAWN_INTERVAL_MIN_MS: u64 = 500;
pub const NORMAL_MAX_ENEMIES_INITIAL: u32 = 10;
pub const NORMAL_MAX_ENEMIES_FINAL: u32 = 25;

// --- Difficulty: intensified ---

pub const INTENSIFIED_SPAWN_INTERVAL_INITIAL_MS: u64 = 600;
pub const INTENSIFIED_SPAWN_INTERVAL_MIN_MS: u64 = 100;
pub const INTENSIFIED_MAX_ENEMIES_INITIAL: u32 = 30;
pub const INTENSIFIED_MAX_ENEMIES_FINAL: u32 = 80;

// --- Burst spawn at session start ---

pub const NORMAL_BURST_MIN: u32 = 5;
pub const NORMAL_BURST_MAX: u32 = 6;
pub const NORMAL_BURST_STAGGER_MS: u64 = 300;

pub const INTENSIFIED_BURST_MIN: u32 = 15;
pub const INTENSIFIED_BURST_MAX: u32 = 18;
pub const INTENSIFIED_BURST_STAGGER_MS: u64 = 200;

// --- Practice targets ---

pub const TARGET_RADIUS: f32 = 2.0;

/// Fixed practice target placements (x, y, z).
pub const TARGET_POSITIONS: [[f32; 3]; 8] = [
    [30.0, 10.0, 0.0],
    [-30.0, 10.0, 0.0],
    [0.0, 15.0, 30.0],
    [0.0, 15.0, -30.0],
    [20.0, 12.0, 20.0],
    [-20.0, 12.0, -20.0],
    [25.0, 8.0, -15.0],
    [-25.0, 18.0, 15.0],
];

// --- Effects ---

/// Particles per explosion.
pub const EXPLOSION_PARTICLES: usize = 20;

/// Frames an explosion particle lives.
pub const EXPLOSION_PARTICLE_LIFE: u32 = 30;

/// Per-frame velocity retention of explosion particles.
pub const EXPLOSION_PARTICLE_DAMPING: f32 = 0.95;

/// Muzzle flash fade step interval (seconds) and opacity lost per step.
pub const MUZZLE_FLASH_FADE_INTERVAL: f32 = 0.03;
pub const MUZZLE_FLASH_FADE_STEP: f32 = 0.1;

// --- Result ranks (enemies destroyed thresholds) ---

pub const RANK_UNTOUCHABLE: u32 = 30;
pub const RANK_EXCELLENT: u32 = 20;
pub const RANK_SKILLED: u32 = 10;
pub const RANK_KEEP_TRYING: u32 = 4;
