//! Ephemeral visual tokens representing in-flight traffic.

use rand::Rng;
use uuid::Uuid;

use crate::config::Viewport;

/// Horizontal spawn position, just off the left edge.
const SPAWN_X: f64 = -5.0;

/// Vertical spread around the center line, in pixels.
const VERTICAL_SPREAD: f64 = 20.0;

/// Pixels advanced per frame step, scaled by the particle's speed.
const PX_PER_STEP: f64 = 2.0;

/// Margin past the right edge before a particle is retired.
const EXIT_MARGIN: f64 = 20.0;

/// One visual token on a node's render surface.
///
/// Owned exclusively by the simulator's per-node field: created on spawn,
/// advanced every frame, destroyed once it exits the visible bound. Nothing
/// outside the field holds a reference to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Opaque identity.
    pub id: Uuid,
    /// Horizontal position in pixels.
    pub x: f64,
    /// Vertical position in pixels.
    pub y: f64,
    /// Horizontal speed factor, `0.5..1.5`.
    pub speed: f64,
    /// Radius in pixels, `2.0..3.0`.
    pub radius: f64,
}

impl Particle {
    /// Spawn a particle at the left edge with randomized vertical offset,
    /// speed, and radius.
    pub fn spawn(rng: &mut impl Rng, viewport: Viewport) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: SPAWN_X,
            y: viewport.center_y() + rng.gen_range(-1.0..1.0) * VERTICAL_SPREAD,
            speed: rng.gen_range(0.5..1.5),
            radius: rng.gen_range(2.0..3.0),
        }
    }

    /// Advance one frame step to the right.
    pub fn advance(&mut self) {
        self.x += self.speed * PX_PER_STEP;
    }

    /// Whether the particle has passed the right edge plus margin.
    #[must_use]
    pub fn is_retired(&self, viewport: Viewport) -> bool {
        self.x >= viewport.width + EXIT_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn spawn_stays_within_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let viewport = Viewport::default();
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, viewport);
            assert!((p.x - -5.0).abs() < f64::EPSILON);
            assert!(p.y >= viewport.center_y() - 20.0);
            assert!(p.y <= viewport.center_y() + 20.0);
            assert!((0.5..1.5).contains(&p.speed));
            assert!((2.0..3.0).contains(&p.radius));
        }
    }

    #[test]
    fn advance_moves_right_by_speed_times_step() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut p = Particle::spawn(&mut rng, Viewport::default());
        let x0 = p.x;
        p.advance();
        assert!((p.x - (x0 + p.speed * 2.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn retires_past_right_edge_plus_margin() {
        let viewport = Viewport::new(100.0, 80.0);
        let mut rng = StdRng::seed_from_u64(7);
        let mut p = Particle::spawn(&mut rng, viewport);
        assert!(!p.is_retired(viewport));
        p.x = 119.9;
        assert!(!p.is_retired(viewport));
        p.x = 120.0;
        assert!(p.is_retired(viewport));
    }
}
