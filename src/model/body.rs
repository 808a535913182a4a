use nalgebra::Point3;

use crate::astro::OrbitPath;
use crate::math::angles::wrap_angle;

use super::trail::Trail;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClassID(pub usize);

/// How a body participates in capture detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRole {
    /// Planet or satellite: moves and leaves a trail, nothing more.
    Orbiter,
    /// Cleanup craft: captures debris it passes near.
    Sweeper,
    /// Capturable junk.
    Debris,
}

/// All the immutable info about a body.
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub name: String,
    pub class: ClassID,
    pub role: BodyRole,
    pub color: Point3<f32>,
    pub marker_size: f32,
}

/// Per-body animation state.
///
/// Owned exclusively by the orrery; between ticks the renderer sees it only
/// through shared references. The position is derived from path and phase on
/// every advance and is never set directly.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyID,
    pub info: BodyInfo,
    path: OrbitPath,
    phase: f64,
    angular_speed: f64,
    z_offset: f64,
    position: Point3<f64>,
    trail: Trail,
    alive: bool,
}

impl Body {
    pub(super) fn new(
        id: BodyID,
        info: BodyInfo,
        path: OrbitPath,
        initial_phase: f64,
        angular_speed: f64,
        z_offset: f64,
        trail_bound: usize,
    ) -> Self {
        let mut body = Body {
            id,
            info,
            path,
            phase: wrap_angle(initial_phase),
            angular_speed,
            z_offset,
            position: Point3::origin(),
            trail: Trail::new(trail_bound),
            alive: true,
        };
        // Seed position and trail at the setup phase, before any tick runs
        body.position = body.evaluate_path();
        body.trail.record(body.position);
        body
    }

    fn evaluate_path(&self) -> Point3<f64> {
        let mut position = self.path.position(self.phase);
        position.z += self.z_offset;
        position
    }

    /// Advances the phase by one clock delta and refreshes position and
    /// trail. Only alive bodies are advanced.
    pub(super) fn advance(&mut self, dt: f64) {
        debug_assert!(self.alive);
        self.phase = wrap_angle(self.phase + self.angular_speed * dt);
        self.position = self.evaluate_path();
        self.trail.record(self.position);
    }

    /// One-way transition out of the simulation; there is no way back.
    pub(super) fn kill(&mut self) {
        self.alive = false;
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }
}
