use crate::error::{Result, SimError};

use serde::{Deserialize, Serialize};
use ultraviolet::DVec2;

use std::collections::VecDeque;

/// Maximum number of past positions kept in a body's trail.
pub const TRAIL_CAPACITY: usize = 50;

/// Decay rate per unit of mass (`k = mass * DECAY_PER_MASS`).
pub const DECAY_PER_MASS: f64 = 1e-8;

/// Colour tag used by renderers to draw a body's trail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TrailColor {
    #[default]
    Pink,
    Green,
    Purple,
    Orange,
    Red,
}

impl TrailColor {
    pub const PALETTE: [TrailColor; 5] = [
        TrailColor::Pink,
        TrailColor::Green,
        TrailColor::Purple,
        TrailColor::Orange,
        TrailColor::Red,
    ];

    /// Picks the palette entry for the `n`th body, wrapping around.
    pub fn cycle(n: usize) -> Self {
        Self::PALETTE[n % Self::PALETTE.len()]
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            TrailColor::Pink => [226, 99, 149],
            TrailColor::Green => [124, 252, 0],
            TrailColor::Purple => [163, 22, 250],
            TrailColor::Orange => [252, 140, 45],
            TrailColor::Red => [255, 0, 0],
        }
    }

    /// Maps a raw tag (as passed over the C ABI) to a colour, wrapping around.
    pub fn from_tag(tag: u8) -> Self {
        Self::cycle(tag as usize)
    }
}

/// Initial state for a body that has not been spawned yet.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub pos: [f64; 2],
    #[serde(default)]
    pub vel: [f64; 2],
    pub radius: f64,
    pub mass: f64,
    #[serde(default)]
    pub color: TrailColor,
}

impl BodySpec {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, mass: f64, color: TrailColor) -> Self {
        Self {
            pos: [pos.x, pos.y],
            vel: [vel.x, vel.y],
            radius,
            mass,
            color,
        }
    }
}

/// A circular point mass living in the simulation.
#[derive(Clone, Debug)]
pub struct Body {
    pub(crate) pos: DVec2,
    pub(crate) vel: DVec2,
    pub(crate) radius: f64,
    pub(crate) mass: f64,
    /// Cached `mass * DECAY_PER_MASS`, refreshed whenever mass changes.
    pub(crate) decay_rate: f64,
    pub(crate) trail: VecDeque<DVec2>,
    pub(crate) color: TrailColor,
    /// Frame index at which the body was spawned.
    pub(crate) created_at: u64,
}

impl Body {
    /// Creates a new body, rejecting non-positive or non-finite size and
    /// non-finite kinematic state.
    pub fn new(
        pos: DVec2,
        vel: DVec2,
        radius: f64,
        mass: f64,
        color: TrailColor,
        created_at: u64,
    ) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidSpawn(format!(
                "radius must be finite and positive, got {radius}"
            )));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidSpawn(format!(
                "mass must be finite and positive, got {mass}"
            )));
        }
        if !(pos.x.is_finite() && pos.y.is_finite() && vel.x.is_finite() && vel.y.is_finite()) {
            return Err(SimError::InvalidSpawn(format!(
                "position {pos:?} and velocity {vel:?} must be finite"
            )));
        }

        Ok(Self {
            pos,
            vel,
            radius,
            mass,
            decay_rate: mass * DECAY_PER_MASS,
            trail: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
            color,
            created_at,
        })
    }

    pub fn from_spec(spec: &BodySpec, created_at: u64) -> Result<Self> {
        Self::new(
            DVec2::new(spec.pos[0], spec.pos[1]),
            DVec2::new(spec.vel[0], spec.vel[1]),
            spec.radius,
            spec.mass,
            spec.color,
            created_at,
        )
    }

    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    pub fn vel(&self) -> DVec2 {
        self.vel
    }

    /// Magnitude of the velocity vector.
    pub fn speed(&self) -> f64 {
        self.vel.mag()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    pub fn color(&self) -> TrailColor {
        self.color
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Past positions, oldest first.
    pub fn trail(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.trail.iter().copied()
    }

    /// Position after one step of `dt` at the current velocity.
    pub fn predicted_pos(&self, dt: f64) -> DVec2 {
        self.pos + self.vel * dt
    }

    /// Advances the position by one step at the current velocity.
    pub fn integrate(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }

    /// Records the current position, dropping the oldest points past capacity.
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_CAPACITY {
            self.trail.pop_front();
        }
    }

    pub(crate) fn refresh_decay_rate(&mut self) {
        self.decay_rate = self.mass * DECAY_PER_MASS;
    }
}

/// Borrows two distinct bodies of a slice mutably at once.
pub(crate) fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    assert_ne!(i, j, "a body cannot be paired with itself");
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Body {
        Body::new(DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0), 5.0, 10.0, TrailColor::Green, 7)
            .unwrap()
    }

    #[test]
    fn new_derives_decay_rate_from_mass() {
        let b = body();
        assert_eq!(b.decay_rate(), 10.0 * DECAY_PER_MASS);
        assert_eq!(b.created_at(), 7);
        assert_eq!(b.speed(), 5.0);
    }

    #[test]
    fn new_rejects_bad_size() {
        let zero = DVec2::zero();
        for (radius, mass) in [(0.0, 1.0), (-1.0, 1.0), (1.0, 0.0), (1.0, f64::NAN)] {
            let err = Body::new(zero, zero, radius, mass, TrailColor::Pink, 0).unwrap_err();
            assert!(matches!(err, SimError::InvalidSpawn(_)));
        }
    }

    #[test]
    fn new_rejects_non_finite_state() {
        let err = Body::new(
            DVec2::new(f64::INFINITY, 0.0),
            DVec2::zero(),
            1.0,
            1.0,
            TrailColor::Pink,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidSpawn(_)));
    }

    #[test]
    fn trail_keeps_most_recent_points() {
        let mut b = body();
        for i in 0..(TRAIL_CAPACITY + 12) {
            b.pos = DVec2::new(i as f64, 0.0);
            b.record_trail();
        }
        assert_eq!(b.trail().len(), TRAIL_CAPACITY);
        assert_eq!(b.trail().next().unwrap().x, 12.0);
        assert_eq!(b.trail().last().unwrap().x, (TRAIL_CAPACITY + 11) as f64);
    }

    #[test]
    fn integrate_moves_along_velocity() {
        let mut b = body();
        b.integrate(0.5);
        assert_eq!(b.pos(), DVec2::new(2.5, 4.0));
    }

    #[test]
    fn color_cycle_wraps() {
        assert_eq!(TrailColor::cycle(0), TrailColor::Pink);
        assert_eq!(TrailColor::cycle(6), TrailColor::Green);
        assert_eq!(TrailColor::from_tag(4), TrailColor::Red);
        assert_eq!(TrailColor::Red.rgb(), [255, 0, 0]);
    }

    #[test]
    fn pair_mut_returns_requested_order() {
        let mut bodies = vec![body(), body(), body()];
        bodies[2].mass = 99.0;
        let (a, b) = pair_mut(&mut bodies, 2, 0);
        assert_eq!(a.mass, 99.0);
        assert_eq!(b.mass, 10.0);
    }
}
