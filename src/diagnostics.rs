//! Aggregate quantities over the live bodies, for HUDs and drift checks.

use crate::body::Body;

use ultraviolet::DVec2;

pub fn total_mass(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| b.mass).sum()
}

/// Sum of `m * v`.
pub fn total_momentum(bodies: &[Body]) -> DVec2 {
    bodies
        .iter()
        .fold(DVec2::zero(), |p, b| p + b.vel * b.mass)
}

/// Sum of `m |v|^2 / 2`.
pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| 0.5 * b.mass * b.vel.mag_sq()).sum()
}
