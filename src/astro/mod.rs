use std::f64::consts::TAU;

use nalgebra::{Point3, Rotation3, Vector3};

mod transfer;

pub use transfer::HohmannTransfer;

/// Closed parametric curve that a body moves along.
///
/// Positions are evaluated directly from the curve at a phase angle; nothing
/// here is integrated from forces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitPath {
    /// Ellipse with semi-major axis `a` and eccentricity `ecc`, tilted out of
    /// the reference plane by rotating about the x-axis through `incl`
    /// (radians).
    Conic { a: f64, ecc: f64, incl: f64 },
    /// Ring of radius `ring_radius` with a circular tube cross-section. The
    /// body circles the ring at the advancing phase angle while sitting at a
    /// fixed `tube_angle` on the cross-section of radius `tube_radius`.
    Torus {
        ring_radius: f64,
        tube_radius: f64,
        tube_angle: f64,
    },
}

impl OrbitPath {
    /// Position at the given phase angle.
    ///
    /// Pure and total: paths come from validated configuration, so `ecc < 1`
    /// keeps the conic denominator positive.
    pub fn position(&self, phase: f64) -> Point3<f64> {
        match *self {
            OrbitPath::Conic { a, ecc, incl } => {
                let r = a * (1.0 - ecc * ecc) / (1.0 + ecc * phase.cos());
                let in_plane = Point3::new(r * phase.cos() - a * ecc, r * phase.sin(), 0.0);
                Rotation3::from_axis_angle(&Vector3::x_axis(), incl) * in_plane
            }
            OrbitPath::Torus {
                ring_radius,
                tube_radius,
                tube_angle,
            } => {
                let spoke = ring_radius + tube_radius * tube_angle.cos();
                Point3::new(
                    spoke * phase.cos(),
                    spoke * phase.sin(),
                    tube_radius * tube_angle.sin(),
                )
            }
        }
    }

    /// Samples the orbit boundary curve as a closed polyline: the full conic,
    /// or the ring spine for a torus.
    ///
    /// The curve depends only on the path, never on time, so callers sample
    /// it once and reuse it every frame.
    pub fn sample(&self, n_points: usize) -> Vec<Point3<f64>> {
        (0..n_points)
            .map(|i| {
                let theta = TAU * i as f64 / n_points as f64;
                match *self {
                    OrbitPath::Conic { .. } => self.position(theta),
                    OrbitPath::Torus { ring_radius, .. } => {
                        Point3::new(ring_radius * theta.cos(), ring_radius * theta.sin(), 0.0)
                    }
                }
            })
            .collect()
    }
}
