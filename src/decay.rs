//! Age-based exponential shrinking of bodies.

use crate::body::{Body, DECAY_PER_MASS};

/// Bodies lighter than this are removed.
pub const MIN_MASS: f64 = 1.0;
/// Bodies smaller than this are removed.
pub const MIN_RADIUS: f64 = 2.0;

/// Whether the body has shrunk past the live thresholds.
pub fn is_spent(body: &Body) -> bool {
    body.mass < MIN_MASS || body.radius < MIN_RADIUS
}

/// Shrinks mass and radius by `e^(-k * age)` where `k` is taken from the
/// current mass and `age` is the number of frames since the body spawned.
///
/// Returns `true` once the body is spent and should be removed.
pub fn apply(body: &mut Body, frame: u64) -> bool {
    let age = frame.saturating_sub(body.created_at) as f64;
    let k = body.mass * DECAY_PER_MASS;
    let factor = (-k * age).exp();

    body.radius *= factor;
    body.mass *= factor;
    body.refresh_decay_rate();

    is_spent(body)
}
