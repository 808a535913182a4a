use std::f64::consts::PI;

use nalgebra::Point3;

/// Two-impulse transfer between coplanar circular orbits.
///
/// The transfer path is half of the ellipse whose periapsis touches the inner
/// orbit and whose apoapsis touches the outer one, with the central body kept
/// at the focus at the origin. `mu` is the central body's gravitational
/// parameter, in units consistent with the radii; everything else is
/// closed-form.
#[derive(Debug, Clone, Copy)]
pub struct HohmannTransfer {
    inner_radius: f64,
    outer_radius: f64,
    mu: f64,
}

impl HohmannTransfer {
    /// Both radii and `mu` must be positive, with `inner_radius <
    /// outer_radius`.
    pub fn new(inner_radius: f64, outer_radius: f64, mu: f64) -> Self {
        debug_assert!(inner_radius > 0.0 && outer_radius > inner_radius && mu > 0.0);
        HohmannTransfer {
            inner_radius,
            outer_radius,
            mu,
        }
    }

    pub fn semimajor_axis(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    pub fn eccentricity(&self) -> f64 {
        (self.outer_radius - self.inner_radius) / (self.outer_radius + self.inner_radius)
    }

    /// Time from the departure burn to arrival: half the transfer period.
    pub fn transfer_time(&self) -> f64 {
        PI * (self.semimajor_axis().powi(3) / self.mu).sqrt()
    }

    /// Angular lead the target needs at departure so that both reach the
    /// apoapsis point together.
    pub fn departure_phase_angle(&self) -> f64 {
        let outer_rate = (self.mu / self.outer_radius.powi(3)).sqrt();
        PI - outer_rate * self.transfer_time()
    }

    /// Position along the outbound half-ellipse; `anomaly` runs from 0 at
    /// departure to π at arrival.
    pub fn position(&self, anomaly: f64) -> Point3<f64> {
        let a = self.semimajor_axis();
        let ecc = self.eccentricity();
        let r = a * (1.0 - ecc * ecc) / (1.0 + ecc * anomaly.cos());
        Point3::new(r * anomaly.cos(), r * anomaly.sin(), 0.0)
    }

    /// Samples the half-ellipse for drawing, departure first.
    pub fn sample(&self, n_points: usize) -> Vec<Point3<f64>> {
        (0..n_points)
            .map(|i| self.position(PI * i as f64 / (n_points - 1) as f64))
            .collect()
    }
}
