use crate::dynamics::state::{ControlInput, RelativeState};
use crate::dynamics::RelativeDynamicsModel;
use crate::error::DynamicsError;
use super::target::TargetMotion;

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta over the relative state
// ---------------------------------------------------------------------------

/// Single RK4 step from `state` at `time`, control held constant over the
/// step. Target kinematics are re-sampled at every stage.
pub fn rk4_step(
    model: &RelativeDynamicsModel,
    target: &dyn TargetMotion,
    state: &RelativeState,
    input: &ControlInput,
    time: f64,
    dt: f64,
) -> Result<RelativeState, DynamicsError> {
    let eval = |t: f64, s: &RelativeState| model.derivatives(s, input, &target.kinematics(t, s));

    let k1 = eval(time, state)?;
    let s2 = state.apply(&k1, dt * 0.5);
    let k2 = eval(time + dt * 0.5, &s2)?;
    let s3 = state.apply(&k2, dt * 0.5);
    let k3 = eval(time + dt * 0.5, &s3)?;
    let s4 = state.apply(&k3, dt);
    let k4 = eval(time + dt, &s4)?;

    Ok(RelativeState {
        sigma: state.sigma
            + (k1.dsigma + 2.0 * k2.dsigma + 2.0 * k3.dsigma + k4.dsigma) * (dt / 6.0),
        omega: state.omega
            + (k1.domega + 2.0 * k2.domega + 2.0 * k3.domega + k4.domega) * (dt / 6.0),
        rho: state.rho + (k1.drho + 2.0 * k2.drho + 2.0 * k3.drho + k4.drho) * (dt / 6.0),
        v: state.v + (k1.dv + 2.0 * k2.dv + 2.0 * k3.dv + k4.dv) * (dt / 6.0),
    })
}
