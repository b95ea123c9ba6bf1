use crate::{
    body::{TrailColor, TRAIL_CAPACITY},
    config::CollisionMode,
    simulation::Simulation,
};
use ultraviolet::DVec2;

/// Flat snapshot of one body for foreign callers.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub speed: f64,
    pub radius: f64,
    pub mass: f64,
    pub color: u8,
    pub trail_len: usize,
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Create() -> *mut Simulation {
    Box::into_raw(Box::new(Simulation::new()))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// Advances one frame and returns how many bodies were removed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Step(handle: *mut Simulation) -> usize {
    unsafe { handle.as_mut() }.map_or(0, |sim| sim.step().removed())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Clear(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.clear();
    }
}

/// Spawns a body; returns `false` if the parameters were rejected.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Spawn(
    handle: *mut Simulation,
    x: f64,
    y: f64,
    radius: f64,
    mass: f64,
    vx: f64,
    vy: f64,
    color: u8,
) -> bool {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return false;
    };
    sim.spawn(
        DVec2::new(x, y),
        DVec2::new(vx, vy),
        radius,
        mass,
        TrailColor::from_tag(color),
    )
    .is_ok()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SetGravity(handle: *mut Simulation, g: f64) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.set_gravity(g);
    }
}

/// Moves G by `steps` toggle increments and returns the new value.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_AdjustGravity(handle: *mut Simulation, steps: f64) -> f64 {
    unsafe { handle.as_mut() }.map_or(0.0, |sim| {
        sim.adjust_gravity(steps);
        sim.gravity()
    })
}

/// `0` = off, `1` = elastic, `2` = elastic with absorption.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SetCollisionMode(handle: *mut Simulation, mode: u32) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.set_collision_mode(CollisionMode::from_raw(mode));
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_SetDecay(handle: *mut Simulation, enabled: bool) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.set_decay(enabled);
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.bodies.len())
}

/// Copies body `index` into `out`. Returns `false` if either pointer is null
/// or the index is out of range.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBody(
    handle: *const Simulation,
    index: usize,
    out: *mut BodyState,
) -> bool {
    let (Some(sim), Some(out)) = (unsafe { handle.as_ref() }, unsafe { out.as_mut() }) else {
        return false;
    };
    let Some(body) = sim.bodies.get(index) else {
        return false;
    };

    *out = BodyState {
        x: body.pos().x,
        y: body.pos().y,
        vx: body.vel().x,
        vy: body.vel().y,
        speed: body.speed(),
        radius: body.radius(),
        mass: body.mass(),
        color: body.color() as u8,
        trail_len: body.trail().len(),
    };
    true
}

/// Writes up to `capacity` trail points of body `index` into `out` as
/// interleaved `x, y` pairs (so `out` must hold `2 * capacity` doubles).
/// A trail never exceeds [`TRAIL_CAPACITY`] points, so larger capacities are
/// capped. Returns the number of points written.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetTrail(
    handle: *const Simulation,
    index: usize,
    out: *mut f64,
    capacity: usize,
) -> usize {
    if out.is_null() {
        return 0;
    }
    let Some(body) = unsafe { handle.as_ref() }.and_then(|sim| sim.bodies.get(index)) else {
        return 0;
    };

    let points = capacity.min(TRAIL_CAPACITY);
    // SAFETY: caller guarantees `out` holds `2 * capacity` doubles, and `points <= capacity`
    let out = unsafe { std::slice::from_raw_parts_mut(out, 2 * points) };
    let mut written = 0;
    for (slot, p) in out.chunks_exact_mut(2).zip(body.trail()) {
        slot[0] = p.x;
        slot[1] = p.y;
        written += 1;
    }
    written
}
