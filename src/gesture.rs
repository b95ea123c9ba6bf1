//! Turns a press-hold-drag-release gesture into a body to spawn.
//!
//! Holding the button grows the body (radius `10t`, mass `10t^3` after `t`
//! seconds); dragging away from the press point sets the launch velocity,
//! pointing back towards the press point like a slingshot.

use crate::body::{BodySpec, TrailColor};

use ultraviolet::DVec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGesture {
    start: DVec2,
    held: f64,
    launch_scale: f64,
}

impl DragGesture {
    /// Shortest hold that produces a body, in seconds.
    pub const MIN_HOLD: f64 = 0.5;
    pub const RADIUS_PER_SECOND: f64 = 10.0;
    pub const MASS_PER_SECOND_CUBED: f64 = 10.0;
    pub const DEFAULT_LAUNCH_SCALE: f64 = 0.02;

    /// Starts a gesture at the press position.
    pub fn begin(start: DVec2) -> Self {
        Self {
            start,
            held: 0.0,
            launch_scale: Self::DEFAULT_LAUNCH_SCALE,
        }
    }

    pub fn with_launch_scale(mut self, launch_scale: f64) -> Self {
        self.launch_scale = launch_scale;
        self
    }

    /// Accumulates hold time; call once per frame with the frame's `dt`.
    pub fn tick(&mut self, dt: f64) {
        self.held += dt;
    }

    pub fn start(&self) -> DVec2 {
        self.start
    }

    pub fn held(&self) -> f64 {
        self.held
    }

    /// Radius of the body that would be spawned right now, for drawing the preview.
    pub fn preview_radius(&self) -> f64 {
        Self::RADIUS_PER_SECOND * self.held
    }

    /// Finishes the gesture at the release position. Short taps yield nothing.
    pub fn release(self, end: DVec2, color: TrailColor) -> Option<BodySpec> {
        if self.held <= Self::MIN_HOLD {
            return None;
        }

        let t = self.held;
        let vel = (self.start - end) * self.launch_scale;
        Some(BodySpec::new(
            self.start,
            vel,
            Self::RADIUS_PER_SECOND * t,
            Self::MASS_PER_SECOND_CUBED * t * t * t,
            color,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn short_tap_spawns_nothing() {
        let mut g = DragGesture::begin(DVec2::new(100.0, 200.0));
        g.tick(0.25);
        g.tick(0.25);
        assert!(g.release(DVec2::new(0.0, 0.0), TrailColor::Pink).is_none());
    }

    #[test]
    fn hold_sets_size_and_drag_sets_velocity() {
        let mut g = DragGesture::begin(DVec2::new(100.0, 200.0));
        for _ in 0..70 {
            g.tick(1.0 / 70.0);
        }
        assert_relative_eq!(g.preview_radius(), 10.0, epsilon = 1e-9);

        let spec = g.release(DVec2::new(150.0, 100.0), TrailColor::Orange).unwrap();
        assert_eq!(spec.pos, [100.0, 200.0]);
        assert_relative_eq!(spec.radius, 10.0, epsilon = 1e-9);
        assert_relative_eq!(spec.mass, 10.0, epsilon = 1e-9);
        assert_relative_eq!(spec.vel[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(spec.vel[1], 2.0, epsilon = 1e-12);
        assert_eq!(spec.color, TrailColor::Orange);
    }

    #[test]
    fn launch_scale_is_configurable() {
        let mut g = DragGesture::begin(DVec2::zero()).with_launch_scale(1.0);
        g.tick(1.0);
        let spec = g.release(DVec2::new(-30.0, 40.0), TrailColor::Red).unwrap();
        assert_eq!(spec.vel, [30.0, -40.0]);
    }
}
