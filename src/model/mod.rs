mod body;
mod capture;
mod clock;
mod orrery;
mod trail;

pub use body::{Body, BodyID, BodyInfo, BodyRole, ClassID};
pub use capture::{CaptureEvent, EventPoint};
pub use clock::SimulationClock;
pub use orrery::{OrbitClass, Orrery};
pub use trail::Trail;
