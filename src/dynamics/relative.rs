use nalgebra::{Matrix3, Vector3};

use super::coupling;
use super::kinematics::mrp_kinematic_matrix;
use super::state::{ChaserParams, ControlInput, RelativeState, StateDeriv, TargetKinematics};
use crate::error::DynamicsError;
use crate::physics::gravity::{CentralBody, EARTH};

// ---------------------------------------------------------------------------
// Relative dynamics model
// ---------------------------------------------------------------------------

/// Coupled relative attitude/translation dynamics of a chaser about a target.
///
/// Holds the chaser parameters, the central body, and the current relative
/// state. Derivative evaluation never touches the held state; the integrator
/// writes it back with [`set_state`](Self::set_state) once a step is accepted.
#[derive(Debug, Clone)]
pub struct RelativeDynamicsModel {
    params: ChaserParams,
    body: CentralBody,
    state: RelativeState,
}

impl RelativeDynamicsModel {
    /// Model about Earth.
    pub fn new(params: ChaserParams, initial: RelativeState) -> Self {
        Self::with_central_body(params, EARTH, initial)
    }

    pub fn with_central_body(
        params: ChaserParams,
        body: CentralBody,
        initial: RelativeState,
    ) -> Self {
        log::debug!(
            "relative dynamics model: mc={} kg, mu={:e}, range={:.3} m",
            params.mass(),
            body.mu,
            initial.range()
        );
        Self {
            params,
            body,
            state: initial,
        }
    }

    pub fn params(&self) -> &ChaserParams {
        &self.params
    }

    pub fn central_body(&self) -> &CentralBody {
        &self.body
    }

    pub fn state(&self) -> &RelativeState {
        &self.state
    }

    pub fn set_state(&mut self, state: RelativeState) {
        self.state = state;
    }

    // --- Coupling terms with this chaser's inertia / central body ---

    pub fn attitude_coriolis(
        &self,
        omega: &Vector3<f64>,
        sigma: &Vector3<f64>,
        omega_it_t: &Vector3<f64>,
    ) -> Matrix3<f64> {
        coupling::attitude_coriolis(self.params.inertia(), omega, sigma, omega_it_t)
    }

    pub fn attitude_disturbance(
        &self,
        sigma: &Vector3<f64>,
        omega_it_t: &Vector3<f64>,
        dot_omega_it_t: &Vector3<f64>,
    ) -> Vector3<f64> {
        coupling::attitude_disturbance(self.params.inertia(), sigma, omega_it_t, dot_omega_it_t)
    }

    pub fn translational_coriolis(
        &self,
        omega: &Vector3<f64>,
        sigma: &Vector3<f64>,
        omega_it_t: &Vector3<f64>,
    ) -> Matrix3<f64> {
        coupling::translational_coriolis(omega, sigma, omega_it_t)
    }

    pub fn translational_disturbance(
        &self,
        r_c: &Vector3<f64>,
        sigma: &Vector3<f64>,
        dot_v_t: &Vector3<f64>,
    ) -> Result<Vector3<f64>, DynamicsError> {
        coupling::translational_disturbance(self.body.mu, r_c, sigma, dot_v_t)
    }

    // --- Equations of motion ---

    /// State derivative at the held state.
    pub fn ode_model(
        &self,
        force: &Vector3<f64>,
        torque: &Vector3<f64>,
        target: &TargetKinematics,
    ) -> Result<StateDeriv, DynamicsError> {
        self.derivatives(&self.state, &ControlInput::new(*force, *torque), target)
    }

    /// State derivative at an arbitrary state.
    ///
    /// ```text
    /// dsigma = G(sigma) omega
    /// domega = Jc^-1 (torque - C1 omega - D1)
    /// drho   = v
    /// dv     = force / mc + C2 v + D2
    /// ```
    pub fn derivatives(
        &self,
        state: &RelativeState,
        input: &ControlInput,
        target: &TargetKinematics,
    ) -> Result<StateDeriv, DynamicsError> {
        let RelativeState { sigma, omega, rho: _, v } = state;

        // --- Attitude ---
        let dsigma = mrp_kinematic_matrix(sigma) * omega;
        let c1 = self.attitude_coriolis(omega, sigma, &target.omega_it_t);
        let d1 = self.attitude_disturbance(sigma, &target.omega_it_t, &target.dot_omega_it_t);
        let domega = self.params.inertia_inv() * (input.torque - c1 * omega - d1);

        // --- Translation ---
        let c2 = self.translational_coriolis(omega, sigma, &target.omega_it_t);
        let d2 = self.translational_disturbance(&target.r_c, sigma, &target.dot_v_t)?;
        let dv = input.force / self.params.mass() + c2 * v + d2;

        let deriv = StateDeriv {
            dsigma,
            domega,
            drho: *v,
            dv,
        };
        check_finite(&deriv)?;
        Ok(deriv)
    }
}

fn check_finite(d: &StateDeriv) -> Result<(), DynamicsError> {
    let parts = [
        ("dsigma", &d.dsigma),
        ("domega", &d.domega),
        ("drho", &d.drho),
        ("dv", &d.dv),
    ];
    for (name, x) in parts {
        if x.iter().any(|c| !c.is_finite()) {
            return Err(DynamicsError::NonFinite(name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::kinematics::skew;
    use crate::physics::MU_EARTH;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_model(initial: RelativeState) -> RelativeDynamicsModel {
        let params = ChaserParams::diagonal(100.0, 50.0, 50.0, 80.0).unwrap();
        RelativeDynamicsModel::new(params, initial)
    }

    fn target_at_rest(r_c: Vector3<f64>) -> TargetKinematics {
        TargetKinematics {
            omega_it_t: Vector3::zeros(),
            dot_omega_it_t: Vector3::zeros(),
            r_c,
            dot_v_t: Vector3::zeros(),
        }
    }

    #[test]
    fn end_to_end_target_at_rest() {
        let initial = RelativeState {
            rho: Vector3::new(1000.0, 0.0, 0.0),
            ..Default::default()
        };
        let model = reference_model(initial);
        let r_c = Vector3::new(7e6, 0.0, 0.0);
        let d = model
            .ode_model(&Vector3::zeros(), &Vector3::zeros(), &target_at_rest(r_c))
            .unwrap();

        assert_relative_eq!(d.dv, -MU_EARTH / (7e6_f64).powi(3) * r_c, max_relative = 1e-14);
        assert_eq!(d.domega, Vector3::zeros());
        assert_eq!(d.dsigma, Vector3::zeros());
        assert_eq!(d.drho, Vector3::zeros());
    }

    #[test]
    fn ode_model_does_not_mutate_state() {
        let initial = RelativeState {
            sigma: Vector3::new(0.1, 0.0, 0.0),
            omega: Vector3::new(0.0, 0.01, 0.0),
            rho: Vector3::new(10.0, 0.0, 0.0),
            v: Vector3::new(0.0, -0.1, 0.0),
        };
        let model = reference_model(initial);
        let target = target_at_rest(Vector3::new(7e6, 0.0, 0.0));
        let a = model.ode_model(&Vector3::x(), &Vector3::z(), &target).unwrap();
        let b = model.ode_model(&Vector3::x(), &Vector3::z(), &target).unwrap();
        assert_eq!(a, b);
        assert_eq!(*model.state(), initial);
    }

    #[test]
    fn applied_force_and_torque_scale_by_mass_properties() {
        let model = reference_model(RelativeState::default());
        let target = target_at_rest(Vector3::new(7e6, 0.0, 0.0));
        let force = Vector3::new(10.0, -20.0, 5.0);
        let torque = Vector3::new(1.0, 2.0, 4.0);

        let free = model
            .ode_model(&Vector3::zeros(), &Vector3::zeros(), &target)
            .unwrap();
        let forced = model.ode_model(&force, &torque, &target).unwrap();

        assert_relative_eq!(forced.dv - free.dv, force / 100.0, epsilon = 1e-12);
        assert_relative_eq!(
            forced.domega,
            Vector3::new(1.0 / 50.0, 2.0 / 50.0, 4.0 / 80.0),
            epsilon = 1e-15
        );
    }

    #[test]
    fn mrp_rate_follows_kinematic_matrix() {
        let state = RelativeState {
            sigma: Vector3::new(0.2, -0.1, 0.3),
            omega: Vector3::new(0.01, 0.02, -0.03),
            ..Default::default()
        };
        let model = reference_model(state);
        let d = model
            .derivatives(
                &state,
                &ControlInput::default(),
                &target_at_rest(Vector3::new(7e6, 0.0, 0.0)),
            )
            .unwrap();
        assert_relative_eq!(d.dsigma, mrp_kinematic_matrix(&state.sigma) * state.omega);
    }

    #[test]
    fn coriolis_term_uses_relative_velocity() {
        let omega = Vector3::new(0.0, 0.0, 0.01);
        let v = Vector3::new(1.0, 0.0, 0.0);
        let state = RelativeState {
            omega,
            v,
            ..Default::default()
        };
        let model = reference_model(state);
        let r_c = Vector3::new(7e6, 0.0, 0.0);
        let d = model
            .derivatives(&state, &ControlInput::default(), &target_at_rest(r_c))
            .unwrap();
        let gravity = -MU_EARTH / (7e6_f64).powi(3) * r_c;
        assert_relative_eq!(d.dv, -skew(&omega) * v + gravity, max_relative = 1e-14);
    }

    #[test]
    fn co_located_circular_target_is_equilibrium() {
        let a = 7e6;
        let n = (MU_EARTH / (a * a * a)).sqrt();
        let target = TargetKinematics {
            omega_it_t: Vector3::new(0.0, 0.0, n),
            dot_omega_it_t: Vector3::zeros(),
            r_c: Vector3::new(a, 0.0, 0.0),
            dot_v_t: Vector3::new(-MU_EARTH / (a * a), 0.0, 0.0),
        };
        let model = reference_model(RelativeState::default());
        let d = model
            .ode_model(&Vector3::zeros(), &Vector3::zeros(), &target)
            .unwrap();
        assert_abs_diff_eq!(d.domega, Vector3::zeros(), epsilon = 1e-18);
        assert_abs_diff_eq!(d.dv, Vector3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn zero_separation_propagates() {
        let model = reference_model(RelativeState::default());
        let target = target_at_rest(Vector3::zeros());
        let err = model.ode_model(&Vector3::zeros(), &Vector3::zeros(), &target);
        assert_eq!(err, Err(DynamicsError::ZeroSeparation));
    }

    #[test]
    fn non_finite_input_is_reported() {
        let model = reference_model(RelativeState::default());
        let err = model.ode_model(
            &Vector3::new(f64::INFINITY, 0.0, 0.0),
            &Vector3::zeros(),
            &target_at_rest(Vector3::new(7e6, 0.0, 0.0)),
        );
        assert_eq!(err, Err(DynamicsError::NonFinite("dv")));

        let err = model.ode_model(
            &Vector3::zeros(),
            &Vector3::new(0.0, f64::NAN, 0.0),
            &target_at_rest(Vector3::new(7e6, 0.0, 0.0)),
        );
        assert_eq!(err, Err(DynamicsError::NonFinite("domega")));
    }

    #[test]
    fn other_central_body_changes_gravity() {
        let moon = CentralBody::new(4.9028e12, 1_737_400.0).unwrap();
        let params = ChaserParams::diagonal(100.0, 50.0, 50.0, 80.0).unwrap();
        let model =
            RelativeDynamicsModel::with_central_body(params, moon, RelativeState::default());
        let r_c = Vector3::new(2.0e6, 0.0, 0.0);
        let d = model
            .ode_model(&Vector3::zeros(), &Vector3::zeros(), &target_at_rest(r_c))
            .unwrap();
        assert_relative_eq!(d.dv.x, -4.9028e12 / 4.0e12, max_relative = 1e-14);
    }
}
