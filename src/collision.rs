//! Predictive contact detection and pair resolution.
//!
//! A pair is in contact when the bodies, moved one step along their current
//! velocities, would overlap. Contacts either merge the pair (when the bodies
//! are already drifting together and the mode allows it) or exchange velocity
//! through the 2D elastic impulse.

use crate::body::Body;
use crate::config::CollisionMode;
use crate::error::{Result, SimError};
use crate::utils;

use log::debug;
use ultraviolet::DVec2;

/// Which side of a pair survived an absorption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Survivor {
    First,
    Second,
}

/// Result of resolving one contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    /// The lighter body was folded into the survivor and must be removed.
    Absorbed(Survivor),
    /// Velocities were exchanged and both bodies advanced one step.
    Elastic,
    /// The bodies overlap exactly; both were advanced without an impulse.
    Degenerate,
}

/// Whether `a` and `b` overlap after one step of `dt` at current velocities.
pub fn predicts_contact(a: &Body, b: &Body, dt: f64) -> bool {
    let r_next = (a.predicted_pos(dt) - b.predicted_pos(dt)).mag();
    r_next <= a.radius + b.radius
}

/// Post-collision velocities of two discs under a perfectly elastic impulse
/// along their line of centres.
pub fn elastic_response(
    m1: f64,
    v1: DVec2,
    p1: DVec2,
    m2: f64,
    v2: DVec2,
    p2: DVec2,
) -> Result<(DVec2, DVec2)> {
    let d = p1 - p2;
    let d_sq = d.mag_sq();
    if d_sq == 0.0 {
        return Err(SimError::DegenerateGeometry { x: p1.x, y: p1.y });
    }

    let total = m1 + m2;
    let v1_new = v1 - d * (2.0 * m2 / total) * ((v1 - v2).dot(d) / d_sq);
    let v2_new = v2 + d * (2.0 * m1 / total) * ((v2 - v1).dot(-d) / d_sq);

    Ok((v1_new, v2_new))
}

/// Folds `absorbed` into `survivor`. Mass adds directly; the radius grows by
/// the square root of the absorbed mass.
pub fn absorb(survivor: &mut Body, absorbed: &Body) {
    survivor.mass += absorbed.mass;
    survivor.radius += absorbed.mass.sqrt();
    survivor.refresh_decay_rate();
}

/// Merges the pair into whichever body is heavier. On a tie the second body wins.
fn merge(a: &mut Body, b: &mut Body) -> Survivor {
    if a.mass > b.mass {
        absorb(a, b);
        Survivor::First
    } else {
        absorb(b, a);
        Survivor::Second
    }
}

/// Resolves a contact between `a` and `b`, which are assumed to be predicted
/// to overlap. Elastic and degenerate outcomes advance both positions by `dt`.
pub fn resolve(a: &mut Body, b: &mut Body, mode: CollisionMode, dt: f64) -> Contact {
    if mode.absorbs() && utils::same_velocity(a.vel, b.vel) {
        let survivor = merge(a, b);
        debug!("absorbed co-moving pair, {survivor:?} survives");
        return Contact::Absorbed(survivor);
    }

    let contact = match elastic_response(a.mass, a.vel, a.pos, b.mass, b.vel, b.pos) {
        Ok((v1, v2)) => {
            a.vel = v1;
            b.vel = v2;
            Contact::Elastic
        }
        Err(err) if mode.absorbs() => {
            let survivor = merge(a, b);
            debug!("{err}, merged instead, {survivor:?} survives");
            return Contact::Absorbed(survivor);
        }
        Err(err) => {
            debug!("{err}, no impulse applied");
            Contact::Degenerate
        }
    };

    a.integrate(dt);
    b.integrate(dt);
    contact
}
