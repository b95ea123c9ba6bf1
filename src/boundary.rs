//! Playfield bounds and what happens to bodies that try to leave them.

use crate::body::Body;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Reflect the offending velocity component.
    #[default]
    Bounce,
    /// Drop the body from the simulation.
    Remove,
}

/// Outcome of checking a body against the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
    Inside,
    Bounced,
    Escaped,
}

/// The visible area bodies live in. The band `0..header` at the top is
/// reserved for the HUD and counts as outside.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
    pub header: f64,
    #[serde(default)]
    pub policy: BoundaryPolicy,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 700.0,
            header: 100.0,
            policy: BoundaryPolicy::Bounce,
        }
    }
}

impl Playfield {
    pub fn contains_x(&self, x: f64) -> bool {
        (0.0..=self.width).contains(&x)
    }

    pub fn contains_y(&self, y: f64) -> bool {
        (self.header..=self.height).contains(&y)
    }

    /// Tests the body's position one step ahead and applies the policy.
    ///
    /// Bounce only reflects an axis the body is leaving through, so a body
    /// that is already outside but heading back in keeps its course.
    pub fn enforce(&self, body: &mut Body, dt: f64) -> Containment {
        let next = body.predicted_pos(dt);
        if self.contains_x(next.x) && self.contains_y(next.y) {
            return Containment::Inside;
        }

        match self.policy {
            BoundaryPolicy::Remove => Containment::Escaped,
            BoundaryPolicy::Bounce => {
                let flip_x = (next.x < 0.0 && body.vel.x < 0.0)
                    || (next.x > self.width && body.vel.x > 0.0);
                let flip_y = (next.y < self.header && body.vel.y < 0.0)
                    || (next.y > self.height && body.vel.y > 0.0);

                if flip_x {
                    body.vel.x = -body.vel.x;
                }
                if flip_y {
                    body.vel.y = -body.vel.y;
                }
                if flip_x || flip_y {
                    Containment::Bounced
                } else {
                    Containment::Inside
                }
            }
        }
    }
}
