use std::f64::consts::TAU;

/// Normalizes an angle into [0, 2π).
///
/// Phase angles grow without bound over long runs; `sin`/`cos` tolerate that,
/// but wrapping keeps the values well-conditioned.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped == TAU {
        0.0
    } else {
        wrapped
    }
}
