//! Difficulty scheduler: maps session progress to spawn cadence and population cap.
//!
//! Both values are linear interpolations between a profile's opening and
//! closing bounds. A profile is picked once at session start and stays fixed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use flak_core::constants::*;

/// Spawn cadence and population cap endpoints for one timed mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub spawn_interval_initial_ms: u64,
    pub spawn_interval_min_ms: u64,
    pub max_enemies_initial: u32,
    pub max_enemies_final: u32,
}

impl DifficultyProfile {
    pub fn normal() -> Self {
        Self {
            spawn_interval_initial_ms: NORMAL_SPAWN_INTERVAL_INITIAL_MS,
            spawn_interval_min_ms: NORMAL_SPAWN_INTERVAL_MIN_MS,
            max_enemies_initial: NORMAL_MAX_ENEMIES_INITIAL,
            max_enemies_final: NORMAL_MAX_ENEMIES_FINAL,
        }
    }

    pub fn intensified() -> Self {
        Self {
            spawn_interval_initial_ms: INTENSIFIED_SPAWN_INTERVAL_INITIAL_MS,
            spawn_interval_min_ms: INTENSIFIED_SPAWN_INTERVAL_MIN_MS,
            max_enemies_initial: INTENSIFIED_MAX_ENEMIES_INITIAL,
            max_enemies_final: INTENSIFIED_MAX_ENEMIES_FINAL,
        }
    }

    /// Spawn interval at `progress` in `[0, 1]`.
    ///
    /// `interval = initial - (initial - min) * progress`, computed in whole
    /// nanoseconds so the endpoints come out exact.
    pub fn current_spawn_interval(&self, progress: f64) -> Duration {
        let progress = clamp_progress(progress);
        let initial = Duration::from_millis(self.spawn_interval_initial_ms).as_nanos() as f64;
        let min = Duration::from_millis(self.spawn_interval_min_ms).as_nanos() as f64;
        let nanos = initial - (initial - min) * progress;
        Duration::from_nanos(nanos.round().max(0.0) as u64)
    }

    /// Population cap at `progress` in `[0, 1]`:
    /// `floor(initial + (final - initial) * progress)`.
    pub fn current_max_enemies(&self, progress: f64) -> usize {
        let progress = clamp_progress(progress);
        let initial = f64::from(self.max_enemies_initial);
        let last = f64::from(self.max_enemies_final);
        (initial + (last - initial) * progress).floor().max(0.0) as usize
    }
}

/// Start-of-session enemy batch for one timed mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstProfile {
    /// Inclusive lower bound on the batch size.
    pub min_count: u32,
    /// Inclusive upper bound on the batch size.
    pub max_count: u32,
    /// Delay between consecutive burst spawns.
    pub stagger_ms: u64,
}

impl BurstProfile {
    pub fn normal() -> Self {
        Self {
            min_count: NORMAL_BURST_MIN,
            max_count: NORMAL_BURST_MAX,
            stagger_ms: NORMAL_BURST_STAGGER_MS,
        }
    }

    pub fn intensified() -> Self {
        Self {
            min_count: INTENSIFIED_BURST_MIN,
            max_count: INTENSIFIED_BURST_MAX,
            stagger_ms: INTENSIFIED_BURST_STAGGER_MS,
        }
    }
}

/// Normalized session progress: `clamp(elapsed / total, 0, 1)`.
///
/// A zero-length session counts as fully progressed.
pub fn progress(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 1.0;
    }
    clamp_progress(elapsed.as_secs_f64() / total.as_secs_f64())
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_normal_endpoints() {
        let profile = DifficultyProfile::normal();
        assert_eq!(profile.current_spawn_interval(0.0), Duration::from_millis(2000));
        assert_eq!(profile.current_spawn_interval(1.0), Duration::from_millis(500));
        assert_eq!(profile.current_max_enemies(0.0), 10);
        assert_eq!(profile.current_max_enemies(1.0), 25);
    }

    #[test]
    fn test_intensified_endpoints() {
        let profile = DifficultyProfile::intensified();
        assert_eq!(profile.current_spawn_interval(0.0), Duration::from_millis(600));
        assert_eq!(profile.current_spawn_interval(1.0), Duration::from_millis(100));
        assert_eq!(profile.current_max_enemies(0.0), 30);
        assert_eq!(profile.current_max_enemies(1.0), 80);
    }

    #[test]
    fn test_midpoint_interpolation() {
        let profile = DifficultyProfile::normal();
        assert_eq!(profile.current_spawn_interval(0.5), Duration::from_millis(1250));
        // 10 + 15 * 0.5 = 17.5 -> floor
        assert_eq!(profile.current_max_enemies(0.5), 17);
    }

    #[rstest]
    #[case(DifficultyProfile::normal())]
    #[case(DifficultyProfile::intensified())]
    fn test_ramp_is_monotonic(#[case] profile: DifficultyProfile) {
        let mut last_interval = profile.current_spawn_interval(0.0);
        let mut last_cap = profile.current_max_enemies(0.0);
        for step in 1..=1000 {
            let p = f64::from(step) / 1000.0;
            let interval = profile.current_spawn_interval(p);
            let cap = profile.current_max_enemies(p);
            assert!(interval <= last_interval, "interval rose at p={p}");
            assert!(cap >= last_cap, "cap fell at p={p}");
            last_interval = interval;
            last_cap = cap;
        }
    }

    #[rstest]
    #[case(-3.0, 0.0)]
    #[case(2.5, 1.0)]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 1.0)]
    fn test_out_of_range_progress_is_clamped(#[case] raw: f64, #[case] clamped: f64) {
        let profile = DifficultyProfile::intensified();
        assert_eq!(
            profile.current_spawn_interval(raw),
            profile.current_spawn_interval(clamped)
        );
        assert_eq!(
            profile.current_max_enemies(raw),
            profile.current_max_enemies(clamped)
        );
    }

    #[test]
    fn test_progress_from_elapsed() {
        let total = Duration::from_secs(60);
        assert_eq!(progress(Duration::ZERO, total), 0.0);
        assert_eq!(progress(Duration::from_secs(30), total), 0.5);
        assert_eq!(progress(Duration::from_secs(60), total), 1.0);
        assert_eq!(progress(Duration::from_secs(90), total), 1.0);
        assert_eq!(progress(Duration::from_secs(1), Duration::ZERO), 1.0);
    }
}
