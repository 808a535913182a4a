use std::collections::HashMap;
use std::f64::consts::TAU;

use nalgebra::Point3;
use rand::Rng;

use crate::astro::OrbitPath;

use super::body::{Body, BodyID, BodyInfo, BodyRole, ClassID};
use super::capture::{check_captures, CaptureEvent};
use super::clock::SimulationClock;

/// Points per cached boundary polyline.
const CURVE_SAMPLES: usize = 200;

/// One orbit family from the scenario: a debris ring, a satellite track, a
/// planet's path.
///
/// The boundary curve depends only on the orbit elements, which never change
/// after setup, so it is sampled once here and reused every frame.
#[derive(Debug, Clone)]
pub struct OrbitClass {
    pub id: ClassID,
    pub name: String,
    pub color: Point3<f32>,
    path: OrbitPath,
    z_offset: f64,
    curve: Vec<Point3<f64>>,
}

impl OrbitClass {
    pub fn path(&self) -> OrbitPath {
        self.path
    }

    /// The cached boundary polyline, ready for the renderer.
    pub fn curve(&self) -> &[Point3<f64>] {
        &self.curve
    }

    /// The path an individual member of this class rides. Ring members get
    /// their own fixed tube angle; conic members share the class path.
    fn member_path(&self, tube_angle: f64) -> OrbitPath {
        match self.path {
            OrbitPath::Torus {
                ring_radius,
                tube_radius,
                ..
            } => OrbitPath::Torus {
                ring_radius,
                tube_radius,
                tube_angle,
            },
            conic => conic,
        }
    }
}

/// Registry of orbit classes and bodies, and owner of the per-frame update
/// pass.
///
/// Bodies are created once at setup and never removed, only marked dead by a
/// capture. The renderer pulls positions, trails and class curves between
/// ticks through the accessors below.
#[derive(Debug, Clone)]
pub struct Orrery {
    classes: Vec<OrbitClass>,
    bodies: HashMap<BodyID, Body>,
    next_body_id: usize,
    capture_radius: f64,
    trail_bound: usize,
}

impl Orrery {
    /// `capture_radius` only matters once a sweeper exists; `trail_bound`
    /// must be positive. Scenario building validates both before calling.
    pub fn new(capture_radius: f64, trail_bound: usize) -> Self {
        debug_assert!(trail_bound > 0);
        Orrery {
            classes: Vec::new(),
            bodies: HashMap::new(),
            next_body_id: 0,
            capture_radius,
            trail_bound,
        }
    }

    pub fn add_class(
        &mut self,
        name: String,
        color: Point3<f32>,
        path: OrbitPath,
        z_offset: f64,
    ) -> ClassID {
        let id = ClassID(self.classes.len());
        self.classes.push(OrbitClass {
            id,
            name,
            color,
            path,
            z_offset,
            curve: path.sample(CURVE_SAMPLES),
        });
        id
    }

    pub fn class(&self, id: ClassID) -> &OrbitClass {
        &self.classes[id.0]
    }

    pub fn classes(&self) -> impl Iterator<Item = &OrbitClass> + '_ {
        self.classes.iter()
    }

    /// Adds a planet or satellite: rides the class path, ignores capture.
    pub fn add_orbiter(
        &mut self,
        name: String,
        class: ClassID,
        color: Point3<f32>,
        marker_size: f32,
        initial_phase: f64,
        angular_speed: f64,
    ) -> BodyID {
        self.insert_body(
            BodyInfo {
                name,
                class,
                role: BodyRole::Orbiter,
                color,
                marker_size,
            },
            0.0,
            initial_phase,
            angular_speed,
        )
    }

    /// Adds a cleanup craft. It starts at phase zero on the ring spine and
    /// captures debris of its own class.
    pub fn add_sweeper(
        &mut self,
        name: String,
        class: ClassID,
        color: Point3<f32>,
        marker_size: f32,
        angular_speed: f64,
    ) -> BodyID {
        self.insert_body(
            BodyInfo {
                name,
                class,
                role: BodyRole::Sweeper,
                color,
                marker_size,
            },
            0.0,
            0.0,
            angular_speed,
        )
    }

    /// Adds a single debris body at the given ring position.
    pub fn add_debris(
        &mut self,
        name: String,
        class: ClassID,
        color: Point3<f32>,
        marker_size: f32,
        initial_phase: f64,
        tube_angle: f64,
        angular_speed: f64,
    ) -> BodyID {
        self.insert_body(
            BodyInfo {
                name,
                class,
                role: BodyRole::Debris,
                color,
                marker_size,
            },
            tube_angle,
            initial_phase,
            angular_speed,
        )
    }

    /// Scatters `count` debris bodies uniformly around the class ring, with
    /// per-body speeds drawn from `speed_range` (inclusive).
    pub fn scatter_debris(
        &mut self,
        class: ClassID,
        color: Point3<f32>,
        marker_size: f32,
        count: usize,
        speed_range: (f64, f64),
        rng: &mut impl Rng,
    ) -> Vec<BodyID> {
        (0..count)
            .map(|i| {
                let name = format!("{} debris {}", self.class(class).name, i + 1);
                let phase = rng.gen_range(0.0..TAU);
                let tube_angle = rng.gen_range(0.0..TAU);
                let speed = rng.gen_range(speed_range.0..=speed_range.1);
                self.add_debris(name, class, color, marker_size, phase, tube_angle, speed)
            })
            .collect()
    }

    fn insert_body(
        &mut self,
        info: BodyInfo,
        tube_angle: f64,
        initial_phase: f64,
        angular_speed: f64,
    ) -> BodyID {
        let id = BodyID(self.next_body_id);
        self.next_body_id += 1;

        let class = &self.classes[info.class.0];
        let body = Body::new(
            id,
            info,
            class.member_path(tube_angle),
            initial_phase,
            angular_speed,
            class.z_offset,
            self.trail_bound,
        );

        self.bodies.insert(id, body);
        id
    }

    /// Runs one simulation step and returns the captures it produced, in
    /// debris-id order.
    ///
    /// The two phases are strictly ordered: every alive body's position is
    /// settled before any capture check reads one, so detection never sees a
    /// mix of old and new positions.
    pub fn tick(&mut self, clock: &mut SimulationClock) -> Vec<CaptureEvent> {
        let dt = clock.tick();

        // Phase 1: advance phases, positions, trails.
        for body in self.bodies.values_mut() {
            if body.alive() {
                body.advance(dt);
            }
        }

        // Phase 2: capture detection against the settled positions. Sweepers
        // are visited in id order so crediting is reproducible; the final
        // state doesn't depend on it either way, captures being one-way.
        let mut sweepers: Vec<(BodyID, ClassID, Point3<f64>)> = self
            .bodies
            .values()
            .filter(|body| body.alive() && body.info.role == BodyRole::Sweeper)
            .map(|body| (body.id, body.info.class, body.position()))
            .collect();
        sweepers.sort_by_key(|&(id, _, _)| id);

        let mut events = Vec::new();
        for (sweeper_id, class, position) in sweepers {
            let targets = self
                .bodies
                .values_mut()
                .filter(|body| body.info.role == BodyRole::Debris && body.info.class == class);
            check_captures(
                sweeper_id,
                position,
                targets,
                self.capture_radius,
                clock.frame(),
                clock.time(),
                &mut events,
            );
        }
        events.sort_by_key(|event| event.debris);
        events
    }

    pub fn get_body(&self, id: BodyID) -> &Body {
        &self.bodies[&id]
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.values()
    }

    /// Bodies still being simulated: what the renderer draws each frame.
    /// Captured bodies never show up here again.
    pub fn alive_bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.values().filter(|body| body.alive())
    }

    pub fn debris_remaining(&self) -> usize {
        self.bodies
            .values()
            .filter(|body| body.alive() && body.info.role == BodyRole::Debris)
            .count()
    }

    pub fn capture_radius(&self) -> f64 {
        self.capture_radius
    }
}
