use nalgebra::Point3;

use super::body::{Body, BodyID};

/// Where and when something happened.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPoint {
    pub frame: u64,
    pub time: f64,
    pub location: Point3<f64>,
}

/// One-way transition of a debris body out of the simulation, recorded the
/// moment a sweeper passed within the capture radius.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureEvent {
    pub sweeper: BodyID,
    pub debris: BodyID,
    pub point: EventPoint,
}

/// Marks every alive target strictly inside `radius` of the sweeper as
/// captured, appending one event per transition.
///
/// Already-captured targets are skipped, so the transition fires at most once
/// per target no matter how often this runs or how many sweepers pass by.
pub(super) fn check_captures<'a>(
    sweeper: BodyID,
    sweeper_position: Point3<f64>,
    targets: impl Iterator<Item = &'a mut Body>,
    radius: f64,
    frame: u64,
    time: f64,
    events: &mut Vec<CaptureEvent>,
) {
    for target in targets {
        if !target.alive() {
            continue;
        }
        let distance = (target.position() - sweeper_position).norm();
        if distance < radius {
            target.kill();
            events.push(CaptureEvent {
                sweeper,
                debris: target.id,
                point: EventPoint {
                    frame,
                    time,
                    location: target.position(),
                },
            });
        }
    }
}
