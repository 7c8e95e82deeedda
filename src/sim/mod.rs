pub mod event;
pub mod integrator;
pub mod runner;
pub mod target;

pub use event::{
    scan_events, ClosestApproachDetector, EventDetector, EventKind, RangeDetector, SimEvent,
};
pub use integrator::rk4_step;
pub use runner::{simulate, simulate_with, SimConfig, SimOutput, TrajectoryPoint};
pub use target::{CircularOrbitTarget, StaticTarget, TargetMotion};
