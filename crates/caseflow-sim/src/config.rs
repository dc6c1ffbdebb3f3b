//! Simulator configuration and rate derivation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default configured rate, in events per minute.
pub const DEFAULT_EVENTS_PER_MINUTE: f64 = 240.0;

/// Upper bound on live particles per node.
pub const DEFAULT_MAX_PARTICLES: usize = 30;

/// Nominal spawn rate substituted when the configured rate is zero or
/// negative, in events per second. Keeps the animation loop's interval
/// arithmetic finite instead of stopping it.
pub const MIN_SPAWN_RATE: f64 = 0.1;

/// Pixel dimensions of the node's render surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Vertical center line.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 220.0,
            height: 80.0,
        }
    }
}

/// Configuration for one stream-producing node's simulator.
///
/// Mutated by the owning node's settings surface and read continuously by
/// the running loops; a rate change takes effect at the next spawn decision
/// without restarting the loop or clearing in-flight particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Configured rate, in events per minute. Never negative in practice,
    /// but zero and negative values are tolerated (see [`MIN_SPAWN_RATE`]).
    pub events_per_minute: f64,
    /// Whether the node is live. Disabling clears all particles and parks
    /// both loops.
    pub enabled: bool,
    /// Upper bound on live particles.
    pub max_particles: usize,
    /// Render surface dimensions.
    pub viewport: Viewport,
}

impl SimConfig {
    /// Create an enabled config with the given rate and defaults elsewhere.
    #[must_use]
    pub fn new(events_per_minute: f64) -> Self {
        Self {
            events_per_minute,
            ..Self::default()
        }
    }

    /// Set the enabled flag.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the particle cap.
    #[must_use]
    pub fn max_particles(mut self, cap: usize) -> Self {
        self.max_particles = cap;
        self
    }

    /// Set the viewport.
    #[must_use]
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Visual spawn interval in milliseconds: `1000 / (rate / 60)`.
    ///
    /// A rate of zero or below substitutes [`MIN_SPAWN_RATE`] so the
    /// animation loop keeps running (it just spawns very rarely) rather
    /// than dividing by zero or stopping.
    #[must_use]
    pub fn spawn_interval_ms(&self) -> f64 {
        let per_second = self.events_per_minute / 60.0;
        let per_second = if per_second > 0.0 {
            per_second
        } else {
            MIN_SPAWN_RATE
        };
        1000.0 / per_second
    }

    /// Production callback period: `(60 / rate)` seconds.
    ///
    /// Unlike the visual spawn interval, the production timer has no
    /// substitution policy: a rate of zero or below means the timer is
    /// simply not armed, so this returns `None`.
    #[must_use]
    pub fn production_period(&self) -> Option<Duration> {
        if self.events_per_minute > 0.0 {
            Some(Duration::from_secs_f64(60.0 / self.events_per_minute))
        } else {
            None
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            events_per_minute: DEFAULT_EVENTS_PER_MINUTE,
            enabled: true,
            max_particles: DEFAULT_MAX_PARTICLES,
            viewport: Viewport::default(),
        }
    }
}
