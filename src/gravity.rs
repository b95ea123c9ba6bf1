//! Pairwise Newtonian attraction.

use crate::body::Body;
use crate::error::{Result, SimError};
use crate::utils;

use ultraviolet::DVec2;

/// Acceleration `subject` feels from `other` under gravitational constant `g`.
///
/// Returns [`SimError::DegenerateGeometry`] when the two bodies share a
/// position or sit so close that the force overflows.
pub fn pair_acceleration(subject: &Body, other: &Body, g: f64) -> Result<DVec2> {
    let degenerate = || SimError::DegenerateGeometry {
        x: subject.pos.x,
        y: subject.pos.y,
    };

    let d = subject.pos - other.pos;
    let r_sq = d.mag_sq();
    if r_sq == 0.0 {
        return Err(degenerate());
    }

    // Negative: the force points from subject back towards other
    let force = -g * subject.mass * other.mass / r_sq;
    if !force.is_finite() {
        return Err(degenerate());
    }
    let theta = utils::angle(d);
    let (sin, cos) = theta.sin_cos();

    Ok(DVec2::new(cos, sin) * (force / subject.mass))
}

/// Applies one frame of `other`'s pull to `subject`'s velocity. Position is
/// left alone. Returns `false` if the pair was degenerate and skipped.
pub fn kick(subject: &mut Body, other: &Body, g: f64, kick_factor: f64, dt: f64) -> bool {
    match pair_acceleration(subject, other, g) {
        Ok(acc) => {
            subject.vel += acc * (kick_factor * dt);
            true
        }
        Err(err) => {
            log::trace!("skipping gravity pair: {err}");
            false
        }
    }
}

/// Net acceleration on `bodies[index]` from every other body.
/// Degenerate pairs contribute nothing.
pub fn net_acceleration(bodies: &[Body], index: usize, g: f64) -> DVec2 {
    let subject = &bodies[index];
    bodies
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != index)
        .filter_map(|(_, other)| pair_acceleration(subject, other, g).ok())
        .fold(DVec2::zero(), |acc, a| acc + a)
}
