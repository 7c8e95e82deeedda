use crate::dynamics::kinematics::mrp_shadow;
use crate::dynamics::state::{ControlInput, RelativeState};
use crate::dynamics::RelativeDynamicsModel;
use crate::error::SimError;
use crate::gnc::{Controller, ZeroControl};
use crate::io::csv::{state_record, StepLogger};
use super::integrator::rk4_step;
use super::target::TargetMotion;

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub dt: f64,              // integration timestep, s
    pub max_time: f64,        // hard stop, s
    pub mrp_switching: bool,  // swap to the shadow set when |sigma| > 1
    pub log_every: usize,     // log every Nth step (initial state always logged)
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,          // 10 Hz
            max_time: 600.0,  // 10 min
            mrp_switching: true,
            log_every: 1,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidConfig(format!("dt must be positive, got {}", self.dt)));
        }
        if !(self.max_time.is_finite() && self.max_time > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "max_time must be positive, got {}",
                self.max_time
            )));
        }
        if self.log_every == 0 {
            return Err(SimError::InvalidConfig("log_every must be at least 1".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Trajectory output
// ---------------------------------------------------------------------------

/// State at a sample time together with the command applied over the
/// following step.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryPoint {
    pub time: f64,
    pub state: RelativeState,
    pub command: ControlInput,
}

#[derive(Debug, Clone, Default)]
pub struct SimOutput {
    pub trajectory: Vec<TrajectoryPoint>,
}

impl SimOutput {
    pub fn final_point(&self) -> Option<&TrajectoryPoint> {
        self.trajectory.last()
    }
}

// ---------------------------------------------------------------------------
// Fixed-step simulation loop
// ---------------------------------------------------------------------------

/// Simulate from the model's current state with a custom controller.
///
/// The controller is reset before the first step.
/// The model's held state is advanced after every accepted step, so on
/// success it ends at the final trajectory point. A failing step stops the
/// run and leaves the model at the last good state.
pub fn simulate_with(
    model: &mut RelativeDynamicsModel,
    target: &dyn TargetMotion,
    controller: &mut dyn Controller,
    config: &SimConfig,
    mut logger: Option<&mut dyn StepLogger>,
) -> Result<SimOutput, SimError> {
    config.validate()?;
    controller.reset();
    log::info!(
        "simulating {:.1} s at dt={} s with '{}' controller",
        config.max_time,
        config.dt,
        controller.name()
    );

    // Tolerate max_time / dt landing a hair above an integer
    let n_steps = (config.max_time / config.dt - 1e-9).ceil().max(1.0) as usize;
    let mut trajectory = Vec::with_capacity((n_steps + 1).min(200_000));
    let mut time = 0.0;
    let mut state = *model.state();

    for step in 0..=n_steps {
        let command = controller.control(time, &state, config.dt);
        let point = TrajectoryPoint { time, state, command };

        if let Some(logger) = logger.as_deref_mut() {
            if step % config.log_every == 0 || step == n_steps {
                logger.log(&state_record(&point))?;
            }
        }
        trajectory.push(point);

        if step == n_steps {
            break;
        }

        let mut next = rk4_step(model, target, &state, &command, time, config.dt).map_err(|e| {
            log::warn!("step failed at t={:.3} s: {}", time, e);
            e
        })?;

        if config.mrp_switching && next.sigma.norm_squared() > 1.0 {
            log::debug!("MRP shadow switch at t={:.3} s", time + config.dt);
            next.sigma = mrp_shadow(&next.sigma);
        }

        state = next;
        time = (step + 1) as f64 * config.dt;
        model.set_state(state);
    }

    log::info!(
        "simulation finished: {} points, final range {:.3} m",
        trajectory.len(),
        state.range()
    );
    Ok(SimOutput { trajectory })
}

/// Free-drift simulation without logging (convenience wrapper).
pub fn simulate(
    model: &mut RelativeDynamicsModel,
    target: &dyn TargetMotion,
    config: &SimConfig,
) -> Result<SimOutput, SimError> {
    let mut controller = ZeroControl;
    simulate_with(model, target, &mut controller, config, None)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
