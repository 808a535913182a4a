use approx::assert_relative_eq;
use itertools::{EitherOrBoth, Itertools};
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use skysweep::astro::OrbitPath;
use skysweep::config::ScenarioConfig;
use skysweep::model::{BodyID, BodyRole, CaptureEvent, Orrery, SimulationClock};
use skysweep::scenario::Scenario;

/// A sweep along a bare ring with three parked debris bodies.
///
/// The sweeper starts at phase 0 and advances 0.05 rad per frame; debris sits
/// at 0.5, 2.0 and 4.5 rad. With ring radius 3 and capture radius 0.7, the
/// chord drops below the threshold once the separation shrinks under
/// 2·asin(0.35/3) ≈ 0.2339 rad, which happens on frames 6, 36 and 86.
#[test]
fn test_sweep_event_sequence() {
    let mut orrery = Orrery::new(0.7, 10);
    let ring = orrery.add_class(
        "ring".to_owned(),
        Point3::new(1.0, 0.3, 0.3),
        OrbitPath::Torus {
            ring_radius: 3.0,
            tube_radius: 0.0,
            tube_angle: 0.0,
        },
        0.0,
    );
    let white = Point3::new(1.0, 1.0, 1.0);
    let sweeper = orrery.add_sweeper("sweeper".to_owned(), ring, white, 10.0, 0.05);
    let debris: Vec<BodyID> = [0.5, 2.0, 4.5]
        .into_iter()
        .enumerate()
        .map(|(i, phase)| {
            orrery.add_debris(
                format!("debris {}", i + 1),
                ring,
                white,
                5.0,
                phase,
                0.0,
                0.0,
            )
        })
        .collect();

    let expected = vec![(6, debris[0]), (36, debris[1]), (86, debris[2])];

    let mut clock = SimulationClock::new(1.0);
    let mut events: Vec<CaptureEvent> = Vec::new();
    for _ in 0..100 {
        events.extend(orrery.tick(&mut clock));
    }

    for pair in expected.into_iter().zip_longest(&events) {
        let ((expected_frame, expected_debris), actual) = match pair {
            EitherOrBoth::Both(expected, actual) => (expected, actual),
            EitherOrBoth::Left(expected) => {
                panic!("expected capture {:?}, but none was found", expected)
            }
            EitherOrBoth::Right(actual) => {
                panic!("did not expect a capture, but found one: {:?}", actual)
            }
        };

        assert_eq!(actual.point.frame, expected_frame);
        assert_eq!(actual.debris, expected_debris);
        assert_eq!(actual.sweeper, sweeper);
        // The event carries the debris position of the capturing frame
        let debris_body = orrery.get_body(expected_debris);
        assert_relative_eq!(actual.point.location, debris_body.position());
    }

    assert_eq!(orrery.debris_remaining(), 0);
}

#[test]
fn test_cleanup_scenario_invariants() {
    let config = ScenarioConfig::load("cleanup.toml").unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let Scenario {
        mut orrery,
        mut clock,
        frames,
    } = Scenario::build(&config, &mut rng).unwrap();

    let debris_total = orrery
        .bodies()
        .filter(|b| b.info.role == BodyRole::Debris)
        .count();
    assert_eq!(debris_total, 15);

    let mut all_events: Vec<CaptureEvent> = Vec::new();
    let mut alive_before = debris_total;
    for frame in 0..frames.unwrap() {
        let events = orrery.tick(&mut clock);

        // Captures only ever shrink the population, one event per loss
        let alive_now = orrery.debris_remaining();
        assert_eq!(alive_before - alive_now, events.len());
        alive_before = alive_now;

        for event in &events {
            let sweeper = orrery.get_body(event.sweeper);
            let debris = orrery.get_body(event.debris);
            assert_eq!(sweeper.info.role, BodyRole::Sweeper);
            assert_eq!(debris.info.role, BodyRole::Debris);
            assert_eq!(sweeper.info.class, debris.info.class);
            assert!(!debris.alive());
        }
        all_events.extend(events);

        // Trail bound holds for everything, alive or not
        for body in orrery.bodies() {
            assert!(body.trail().len() <= config.trail_length);
            if body.alive() {
                assert_eq!(
                    body.trail().len(),
                    usize::min(frame as usize + 2, config.trail_length)
                );
            }
        }
    }

    // Each debris body was captured at most once
    let mut captured: Vec<BodyID> = all_events.iter().map(|e| e.debris).collect();
    captured.sort();
    captured.dedup();
    assert_eq!(captured.len(), all_events.len());
    assert_eq!(orrery.debris_remaining(), debris_total - all_events.len());
}

#[test]
fn test_solar_system_scenario_runs_quietly() {
    let config = ScenarioConfig::load("solar-system.toml").unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let Scenario {
        mut orrery,
        mut clock,
        ..
    } = Scenario::build(&config, &mut rng).unwrap();

    assert_eq!(orrery.bodies().count(), 8);
    assert!(orrery
        .bodies()
        .all(|b| b.info.role == BodyRole::Orbiter));

    for _ in 0..500 {
        assert!(orrery.tick(&mut clock).is_empty());
    }
    assert_eq!(orrery.alive_bodies().count(), 8);

    // Earth's track is flat, so its height is exactly the axial-tilt lift
    let earth = orrery
        .bodies()
        .find(|b| b.info.name == "Earth")
        .unwrap();
    assert_relative_eq!(
        earth.position().z,
        0.1 * 23.4_f64.to_radians().sin(),
        max_relative = 1e-12
    );

    // A planet on an inclined track keeps the orbit-model radius
    let mercury = orrery
        .bodies()
        .find(|b| b.info.name == "Mercury")
        .unwrap();
    let lift = 0.1 * 0.03_f64.to_radians().sin();
    let mut position = mercury.position();
    position.z -= lift;
    assert_relative_eq!(position.coords.norm(), 5.0, max_relative = 1e-9);
}
