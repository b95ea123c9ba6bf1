use crate::body::{BodySpec, TrailColor};
use crate::boundary::Playfield;

use ultraviolet::DVec2;

/// Direction of `v` in radians, measured from the positive x-axis.
pub fn angle(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

/// Rounds `x` to `places` decimal places.
pub fn round_to(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round() / scale
}

/// Whether two velocities agree to three decimal places on both axes,
/// i.e. the bodies are drifting together.
pub fn same_velocity(a: DVec2, b: DVec2) -> bool {
    round_to(a.x, 3) == round_to(b.x, 3) && round_to(a.y, 3) == round_to(b.y, 3)
}

/// Generates `n` bodies scattered uniformly over the playfield with small random
/// launch velocities. Deterministic for a given `seed`.
pub fn random_field(n: usize, field: &Playfield, seed: u64) -> Vec<BodySpec> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut specs = Vec::with_capacity(n);

    while specs.len() < n {
        // Same size curve as the drag tool: hold time t gives radius 10t, mass 10t^3
        let t = 0.5 + rng.f64() * 1.5;
        let radius = 10.0 * t;
        let mass = 10.0 * t * t * t;

        let pos = DVec2::new(
            radius + rng.f64() * (field.width - 2.0 * radius).max(0.0),
            field.header + radius + rng.f64() * (field.height - field.header - 2.0 * radius).max(0.0),
        );

        let a = rng.f64() * std::f64::consts::TAU;
        let (sin, cos) = a.sin_cos();
        let speed = rng.f64() * 60.0;
        let vel = DVec2::new(cos, sin) * speed;

        specs.push(BodySpec::new(pos, vel, radius, mass, TrailColor::cycle(specs.len())));
    }

    specs
}
