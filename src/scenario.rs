use rand::Rng;

use crate::astro::OrbitPath;
use crate::config::{parse_color, ConfigurationError, OrbitConfig, ScenarioConfig};
use crate::model::{Orrery, SimulationClock};

// Marker sizes handed to the renderer, per role.
const ORBITER_MARKER: f32 = 6.0;
const SWEEPER_MARKER: f32 = 10.0;
const DEBRIS_MARKER: f32 = 5.0;

/// Vertical lift applied per unit of axial-tilt sine, purely a display
/// effect carried over from the planetary scene.
const AXIAL_TILT_LIFT: f64 = 0.1;

/// A fully-initialized simulation: a validated scenario turned into runtime
/// state. The host loop owns the clock and drives `orrery.tick` with it.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub orrery: Orrery,
    pub clock: SimulationClock,
    /// Total frames to run; `None` means run until the host stops.
    pub frames: Option<u64>,
}

impl Scenario {
    /// Validates the configuration and builds the initial body population.
    /// Debris placement draws from `rng`; seed it for reproducible runs.
    ///
    /// All validation happens here, before any simulation state exists, so
    /// every error is a [`ConfigurationError`] surfaced to the caller.
    pub fn build(
        config: &ScenarioConfig,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigurationError> {
        if config.trail_length == 0 {
            return Err(ConfigurationError::NonPositiveTrailBound);
        }
        if config.frame_step <= 0.0 {
            return Err(ConfigurationError::NonPositiveFrameStep(config.frame_step));
        }

        let has_sweepers = config.orbits.iter().any(|o| o.sweeper_speed.is_some());
        let capture_radius = config.capture_radius.unwrap_or(0.0);
        if has_sweepers && capture_radius <= 0.0 {
            return Err(ConfigurationError::NonPositiveCaptureRadius);
        }

        let mut orrery = Orrery::new(capture_radius, config.trail_length);

        for orbit in &config.orbits {
            let color = parse_color(&orbit.name, &orbit.color)?;
            let path = orbit_shape(orbit)?;
            let z_offset = orbit
                .axial_tilt_deg
                .map_or(0.0, |tilt| AXIAL_TILT_LIFT * tilt.to_radians().sin());
            let class = orrery.add_class(orbit.name.clone(), color, path, z_offset);

            if let Some(speed) = orbit.orbiter_speed {
                orrery.add_orbiter(orbit.name.clone(), class, color, ORBITER_MARKER, 0.0, speed);
            }

            if let Some(speed) = orbit.sweeper_speed {
                let sweeper_color = match &orbit.sweeper_color {
                    Some(tag) => parse_color(&orbit.name, tag)?,
                    None => color,
                };
                orrery.add_sweeper(
                    format!("{} sweeper", orbit.name),
                    class,
                    sweeper_color,
                    SWEEPER_MARKER,
                    speed,
                );
            }

            if orbit.debris_count > 0 {
                let [low, high] =
                    orbit
                        .debris_speed
                        .ok_or_else(|| ConfigurationError::MissingSpeedRange {
                            name: orbit.name.clone(),
                        })?;
                if low > high {
                    return Err(ConfigurationError::BadSpeedRange {
                        name: orbit.name.clone(),
                    });
                }
                orrery.scatter_debris(
                    class,
                    color,
                    DEBRIS_MARKER,
                    orbit.debris_count,
                    (low, high),
                    rng,
                );
            }
        }

        Ok(Scenario {
            orrery,
            clock: SimulationClock::new(config.frame_step),
            frames: config.frames,
        })
    }
}

fn orbit_shape(orbit: &OrbitConfig) -> Result<OrbitPath, ConfigurationError> {
    match (orbit.semimajor_axis, orbit.ring_radius) {
        (Some(_), Some(_)) => Err(ConfigurationError::AmbiguousShape {
            name: orbit.name.clone(),
        }),
        (None, None) => Err(ConfigurationError::MissingShape {
            name: orbit.name.clone(),
        }),
        (Some(a), None) => {
            if a <= 0.0 {
                return Err(ConfigurationError::NonPositiveAxis {
                    name: orbit.name.clone(),
                    value: a,
                });
            }
            if !(0.0..1.0).contains(&orbit.eccentricity) {
                return Err(ConfigurationError::EccentricityOutOfRange {
                    name: orbit.name.clone(),
                    value: orbit.eccentricity,
                });
            }
            Ok(OrbitPath::Conic {
                a,
                ecc: orbit.eccentricity,
                incl: orbit.inclination_deg.to_radians(),
            })
        }
        (None, Some(ring_radius)) => {
            let tube_radius = orbit.tube_radius.unwrap_or(0.0);
            if ring_radius <= 0.0 || tube_radius <= 0.0 {
                return Err(ConfigurationError::NonPositiveRing {
                    name: orbit.name.clone(),
                });
            }
            Ok(OrbitPath::Torus {
                ring_radius,
                tube_radius,
                tube_angle: 0.0,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::ScenarioConfig;
    use crate::model::BodyRole;

    use super::*;

    fn build(text: &str) -> Result<Scenario, ConfigurationError> {
        let config = ScenarioConfig::parse(text)?;
        let mut rng = StdRng::seed_from_u64(0);
        Scenario::build(&config, &mut rng)
    }

    #[test]
    fn test_build_cleanup_style_scenario() {
        let scenario = build(
            r#"
            capture_radius = 0.7
            trail_length = 60
            frames = 1000

            [[orbit]]
            name = "LEO"
            color = "ff3030"
            ring_radius = 3.0
            tube_radius = 0.3
            sweeper_speed = 0.05
            sweeper_color = "00ffff"
            debris_count = 5
            debris_speed = [0.035, 0.065]
            "#,
        )
        .unwrap();

        assert_eq!(scenario.frames, Some(1000));
        let orrery = &scenario.orrery;
        assert_eq!(orrery.classes().count(), 1);
        assert_eq!(orrery.bodies().count(), 6);
        assert_eq!(orrery.debris_remaining(), 5);
        assert_eq!(
            orrery
                .bodies()
                .filter(|b| b.info.role == BodyRole::Sweeper)
                .count(),
            1
        );
    }

    #[test]
    fn test_rejects_bad_eccentricity() {
        let result = build(
            r#"
            trail_length = 50
            [[orbit]]
            name = "bad"
            color = "ffffff"
            semimajor_axis = 10.0
            eccentricity = 1.0
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::EccentricityOutOfRange { value, .. }) if value == 1.0
        ));
    }

    #[test]
    fn test_rejects_nonpositive_axis() {
        let result = build(
            r#"
            trail_length = 50
            [[orbit]]
            name = "bad"
            color = "ffffff"
            semimajor_axis = -1.0
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::NonPositiveAxis { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_trail_bound() {
        let result = build(
            r#"
            trail_length = 0
            [[orbit]]
            name = "LEO"
            color = "ffffff"
            semimajor_axis = 10.0
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::NonPositiveTrailBound)
        ));
    }

    #[test]
    fn test_rejects_sweeper_without_capture_radius() {
        let result = build(
            r#"
            trail_length = 50
            [[orbit]]
            name = "LEO"
            color = "ffffff"
            ring_radius = 3.0
            tube_radius = 0.3
            sweeper_speed = 0.05
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::NonPositiveCaptureRadius)
        ));
    }

    #[test]
    fn test_rejects_conflicting_and_missing_shapes() {
        let conflicting = build(
            r#"
            trail_length = 50
            [[orbit]]
            name = "both"
            color = "ffffff"
            semimajor_axis = 10.0
            ring_radius = 3.0
            tube_radius = 0.3
            "#,
        );
        assert!(matches!(
            conflicting,
            Err(ConfigurationError::AmbiguousShape { .. })
        ));

        let missing = build(
            r#"
            trail_length = 50
            [[orbit]]
            name = "neither"
            color = "ffffff"
            "#,
        );
        assert!(matches!(
            missing,
            Err(ConfigurationError::MissingShape { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let result = build(
            r#"
            trail_length = 50
            [[orbit]]
            name = "LEO"
            color = "ffffff"
            ring_radius = 3.0
            tube_radius = 0.3
            debris_count = 3
            debris_speed = [0.06, 0.03]
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::BadSpeedRange { .. })
        ));
    }
}
