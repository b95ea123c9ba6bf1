use crate::{
    body::{pair_mut, Body, BodySpec, TrailColor},
    boundary::Containment,
    collision::{self, Contact, Survivor},
    config::{CollisionMode, SimConfig},
    decay,
    error::Result,
    gravity,
};

use log::{debug, info, warn};
use ultraviolet::DVec2;

/// What happened during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Contacts resolved, whatever their outcome.
    pub collisions: usize,
    /// Bodies removed by absorption.
    pub absorbed: usize,
    /// Bodies removed by decay.
    pub decayed: usize,
    /// Bodies removed for leaving the playfield.
    pub escaped: usize,
}

impl StepReport {
    pub fn removed(&self) -> usize {
        self.absorbed + self.decayed + self.escaped
    }
}

/// Advances every body by one frame.
///
/// For each live body in order: gravity from every other body (or, for pairs
/// predicted to touch, a collision instead), position integration unless the
/// collision already moved it, decay, trail sampling and the boundary check.
/// Bodies keep their indices for the whole frame; removed ones are only
/// skipped and get compacted out at the end.
///
/// A configuration that fails [`SimConfig::check`] leaves every body
/// untouched, and a negative G acts as zero.
pub fn step(bodies: &mut Vec<Body>, config: &SimConfig, frame: u64) -> StepReport {
    if let Err(err) = config.check() {
        warn!("frame {frame} skipped: {err}");
        return StepReport::default();
    }
    let dt = config.dt();
    let g = config.effective_gravity();
    let n = bodies.len();

    let mut alive = vec![true; n];
    let mut advanced = vec![false; n];
    // Pairs (lo, hi) that collided this frame; each pair interacts once per frame
    let mut resolved: Vec<(usize, usize)> = Vec::new();
    let mut report = StepReport::default();

    let sample_trail = frame.saturating_sub(1) % config.trail_interval.max(1) == 0;

    for i in 0..n {
        if !alive[i] {
            continue;
        }

        for j in 0..n {
            if j == i || !alive[j] {
                continue;
            }
            let pair = (i.min(j), i.max(j));
            if resolved.contains(&pair) {
                continue;
            }

            let (subject, other) = pair_mut(bodies, i, j);

            if config.collisions.enabled() && collision::predicts_contact(subject, other, dt) {
                resolved.push(pair);
                report.collisions += 1;

                match collision::resolve(subject, other, config.collisions, dt) {
                    Contact::Absorbed(Survivor::First) => {
                        alive[j] = false;
                        report.absorbed += 1;
                    }
                    Contact::Absorbed(Survivor::Second) => {
                        alive[i] = false;
                        report.absorbed += 1;
                        break;
                    }
                    Contact::Elastic | Contact::Degenerate => {
                        advanced[i] = true;
                        advanced[j] = true;
                    }
                }
            } else {
                gravity::kick(subject, other, g, config.kick_factor, dt);
            }
        }

        if !alive[i] {
            continue;
        }

        let body = &mut bodies[i];
        if !advanced[i] {
            body.integrate(dt);
            advanced[i] = true;
        }

        if sample_trail {
            body.record_trail();
        }

        if config.decay && decay::apply(body, frame) {
            alive[i] = false;
            report.decayed += 1;
            continue;
        }

        if let Some(field) = &config.playfield {
            if field.enforce(body, dt) == Containment::Escaped {
                alive[i] = false;
                report.escaped += 1;
            }
        }
    }

    if report.removed() > 0 {
        let mut index = 0;
        bodies.retain(|_| {
            let keep = alive[index];
            index += 1;
            keep
        });
        debug!("frame {frame}: {report:?}, {} bodies left", bodies.len());
    }

    report
}

/// Owns the live bodies, the configuration and the frame counter.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Current frame count.
    pub frame: u64,
    /// All live bodies, in spawn order.
    pub bodies: Vec<Body>,
    pub config: SimConfig,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Empty simulation with default configuration.
    pub fn new() -> Self {
        Self {
            frame: 0,
            bodies: Vec::new(),
            config: SimConfig::default(),
        }
    }

    /// Empty simulation; the configuration is validated first.
    pub fn with_config(config: SimConfig) -> Result<Self> {
        Self::with_bodies(config, &[])
    }

    /// Builds a simulation from a configuration and initial bodies, all
    /// created at frame 0.
    pub fn with_bodies(config: SimConfig, specs: &[BodySpec]) -> Result<Self> {
        let config = config.validated()?;
        let bodies = specs
            .iter()
            .map(|spec| Body::from_spec(spec, 0))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            frame: 0,
            bodies,
            config,
        })
    }

    pub fn dt(&self) -> f64 {
        self.config.dt()
    }

    /// Adds a body created at the current frame and returns it.
    pub fn spawn(
        &mut self,
        pos: DVec2,
        vel: DVec2,
        radius: f64,
        mass: f64,
        color: TrailColor,
    ) -> Result<&Body> {
        let body = Body::new(pos, vel, radius, mass, color, self.frame)?;
        info!(
            "spawned body #{} at ({:.1}, {:.1}) r={radius:.2} m={mass:.2}",
            self.bodies.len(),
            pos.x,
            pos.y
        );
        self.bodies.push(body);
        Ok(&self.bodies[self.bodies.len() - 1])
    }

    pub fn spawn_spec(&mut self, spec: &BodySpec) -> Result<&Body> {
        self.spawn(
            DVec2::new(spec.pos[0], spec.pos[1]),
            DVec2::new(spec.vel[0], spec.vel[1]),
            spec.radius,
            spec.mass,
            spec.color,
        )
    }

    /// Advances the simulation by one frame.
    pub fn step(&mut self) -> StepReport {
        self.frame += 1;
        step(&mut self.bodies, &self.config, self.frame)
    }

    /// Removes every body. The frame counter keeps running.
    pub fn clear(&mut self) {
        info!("cleared {} bodies", self.bodies.len());
        self.bodies.clear();
    }

    pub fn gravity(&self) -> f64 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, g: f64) {
        self.config.set_gravity(g);
    }

    /// Moves G by `steps` toggle increments, never below zero.
    pub fn adjust_gravity(&mut self, steps: f64) {
        self.config.adjust_gravity(steps);
    }

    pub fn set_collision_mode(&mut self, mode: CollisionMode) {
        self.config.collisions = mode;
    }

    /// Switches between elastic-only and elastic-plus-absorb collisions.
    /// Turns collisions on if they were off.
    pub fn toggle_absorption(&mut self) -> CollisionMode {
        self.config.collisions = match self.config.collisions {
            CollisionMode::Absorb => CollisionMode::Elastic,
            CollisionMode::Elastic | CollisionMode::Off => CollisionMode::Absorb,
        };
        self.config.collisions
    }

    pub fn set_decay(&mut self, enabled: bool) {
        self.config.decay = enabled;
    }

    pub fn toggle_decay(&mut self) -> bool {
        self.config.decay = !self.config.decay;
        self.config.decay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{BoundaryPolicy, Playfield};

    fn open_config() -> SimConfig {
        SimConfig {
            playfield: None,
            ..SimConfig::default()
        }
    }

    #[test]
    fn spawn_records_current_frame() {
        let mut sim = Simulation::with_config(open_config()).unwrap();
        sim.step();
        sim.step();
        let body = sim
            .spawn(DVec2::new(10.0, 10.0), DVec2::zero(), 5.0, 10.0, TrailColor::Red)
            .unwrap();
        assert_eq!(body.created_at(), 2);
    }

    #[test]
    fn drag_gesture_spawns_body() {
        let mut sim = Simulation::new();
        let mut gesture = crate::gesture::DragGesture::begin(DVec2::new(300.0, 300.0));
        for _ in 0..sim.config.fps {
            gesture.tick(sim.dt());
        }
        let color = TrailColor::cycle(sim.bodies.len());
        let spec = gesture.release(DVec2::new(350.0, 300.0), color).unwrap();

        let body = sim.spawn_spec(&spec).unwrap();
        assert!((body.radius() - 10.0).abs() < 1e-9);
        assert_eq!(body.vel(), DVec2::new(-1.0, 0.0));
        assert_eq!(body.color(), TrailColor::Pink);
    }

    #[test]
    fn spawn_rejects_invalid_body() {
        let mut sim = Simulation::new();
        assert!(sim.spawn(DVec2::zero(), DVec2::zero(), 0.0, 10.0, TrailColor::Red).is_err());
        assert!(sim.bodies.is_empty());
    }

    #[test]
    fn lone_body_drifts_in_straight_line() {
        let mut sim = Simulation::with_config(open_config()).unwrap();
        sim.spawn(DVec2::new(0.0, 0.0), DVec2::new(70.0, -35.0), 5.0, 10.0, TrailColor::Pink)
            .unwrap();
        for _ in 0..70 {
            sim.step();
        }
        let pos = sim.bodies[0].pos();
        assert!((pos.x - 70.0).abs() < 1e-9);
        assert!((pos.y + 35.0).abs() < 1e-9);
    }

    #[test]
    fn trail_is_sampled_on_interval() {
        let mut sim = Simulation::with_config(SimConfig {
            trail_interval: 5,
            ..open_config()
        })
        .unwrap();
        sim.spawn(DVec2::zero(), DVec2::new(1.0, 0.0), 5.0, 10.0, TrailColor::Pink)
            .unwrap();
        for _ in 0..11 {
            sim.step();
        }
        // Frames 1, 6 and 11
        assert_eq!(sim.bodies[0].trail().len(), 3);
    }

    #[test]
    fn remove_policy_drops_escaping_body() {
        let mut sim = Simulation::with_config(SimConfig {
            playfield: Some(Playfield {
                policy: BoundaryPolicy::Remove,
                ..Playfield::default()
            }),
            ..SimConfig::default()
        })
        .unwrap();
        sim.spawn(DVec2::new(1.0, 400.0), DVec2::new(-700.0, 0.0), 5.0, 10.0, TrailColor::Pink)
            .unwrap();
        sim.spawn(DVec2::new(600.0, 400.0), DVec2::zero(), 5.0, 10.0, TrailColor::Green)
            .unwrap();
        let report = sim.step();
        assert_eq!(report.escaped, 1);
        assert_eq!(sim.bodies.len(), 1);
        assert_eq!(sim.bodies[0].color(), TrailColor::Green);
    }

    #[test]
    fn bounce_policy_keeps_body() {
        let mut sim = Simulation::new();
        sim.spawn(DVec2::new(1.0, 400.0), DVec2::new(-700.0, 0.0), 5.0, 10.0, TrailColor::Pink)
            .unwrap();
        let report = sim.step();
        assert_eq!(report.removed(), 0);
        assert!(sim.bodies[0].vel().x > 0.0);
    }

    #[test]
    fn with_config_clamps_negative_gravity() {
        let sim = Simulation::with_config(SimConfig {
            gravity: -80.0,
            ..open_config()
        })
        .unwrap();
        assert_eq!(sim.gravity(), 0.0);
    }

    #[test]
    fn with_config_rejects_unsteppable_values() {
        for config in [
            SimConfig { fps: 0, ..open_config() },
            SimConfig { kick_factor: f64::INFINITY, ..open_config() },
            SimConfig { kick_factor: f64::NAN, ..open_config() },
        ] {
            assert!(matches!(
                Simulation::with_config(config),
                Err(crate::error::SimError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn raw_negative_gravity_does_not_repel() {
        let mut bodies = vec![
            Body::new(DVec2::new(0.0, 0.0), DVec2::zero(), 5.0, 10.0, TrailColor::Pink, 0).unwrap(),
            Body::new(DVec2::new(200.0, 0.0), DVec2::zero(), 5.0, 10.0, TrailColor::Green, 0)
                .unwrap(),
        ];
        let config = SimConfig {
            gravity: -80.0,
            ..open_config()
        };
        step(&mut bodies, &config, 1);
        assert_eq!(bodies[0].vel(), DVec2::zero());
        assert_eq!(bodies[1].vel(), DVec2::zero());
    }

    #[test]
    fn raw_zero_fps_skips_frame() {
        let mut sim = Simulation::new();
        sim.spawn(DVec2::new(600.0, 400.0), DVec2::new(1.0, 0.0), 5.0, 10.0, TrailColor::Pink)
            .unwrap();
        sim.config.fps = 0;
        assert_eq!(sim.step(), StepReport::default());
        assert_eq!(sim.bodies[0].pos(), DVec2::new(600.0, 400.0));

        sim.config.fps = 1;
        sim.config.kick_factor = f64::NAN;
        sim.step();
        assert_eq!(sim.bodies[0].pos(), DVec2::new(600.0, 400.0));
        assert!(sim.bodies[0].vel().x.is_finite());
    }

    #[test]
    fn toggles() {
        let mut sim = Simulation::new();
        assert_eq!(sim.toggle_absorption(), CollisionMode::Elastic);
        assert_eq!(sim.toggle_absorption(), CollisionMode::Absorb);
        assert!(sim.toggle_decay());
        assert!(!sim.toggle_decay());

        sim.set_gravity(-5.0);
        assert_eq!(sim.gravity(), 0.0);
        sim.adjust_gravity(2.0);
        assert_eq!(sim.gravity(), 20.0);
    }

    #[test]
    fn clear_empties_but_keeps_counting() {
        let mut sim = Simulation::new();
        sim.spawn(DVec2::new(600.0, 400.0), DVec2::zero(), 5.0, 10.0, TrailColor::Pink)
            .unwrap();
        sim.step();
        sim.clear();
        assert!(sim.bodies.is_empty());
        sim.step();
        assert_eq!(sim.frame, 2);
    }
}
