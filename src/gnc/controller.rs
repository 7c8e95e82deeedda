use crate::dynamics::state::{ControlInput, RelativeState};

/// Trait for proximity-operations controllers.
///
/// Implement this to plug a control law into the simulation loop. The
/// dynamics only see the returned force and torque.
pub trait Controller {
    /// Compute force and torque commands (chaser frame) from the current state.
    fn control(&mut self, time: f64, state: &RelativeState, dt: f64) -> ControlInput;

    /// Clear internal state. Called once at the start of every run.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Free drift: no force, no torque.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroControl;

impl Controller for ZeroControl {
    fn control(&mut self, _time: f64, _state: &RelativeState, _dt: f64) -> ControlInput {
        ControlInput::default()
    }

    fn name(&self) -> &str {
        "free drift"
    }
}
