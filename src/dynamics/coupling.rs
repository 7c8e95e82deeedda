use nalgebra::{Matrix3, Vector3};

use super::kinematics::{mrp_to_rotation, skew};
use crate::error::DynamicsError;
use crate::physics::gravity::point_mass_accel;

// ---------------------------------------------------------------------------
// Attitude coupling (C1, D1)
// ---------------------------------------------------------------------------

/// Gyroscopic coupling matrix C1 of the relative attitude dynamics.
///
/// With `w = R_t^c * omega_it_t` (target inertial rate seen in the chaser frame):
/// `C1 = -Jc [w]x - [w]x Jc + [Jc (omega + w)]x`
pub fn attitude_coriolis(
    jc: &Matrix3<f64>,
    omega: &Vector3<f64>,
    sigma: &Vector3<f64>,
    omega_it_t: &Vector3<f64>,
) -> Matrix3<f64> {
    let w = mrp_to_rotation(sigma) * omega_it_t;
    let w_x = skew(&w);
    -jc * w_x - w_x * jc + skew(&(jc * (omega + w)))
}

/// Non-inertial forcing D1 from the target's angular motion.
///
/// `D1 = -[w]x Jc w - Jc R_t^c dot_omega_it_t`
pub fn attitude_disturbance(
    jc: &Matrix3<f64>,
    sigma: &Vector3<f64>,
    omega_it_t: &Vector3<f64>,
    dot_omega_it_t: &Vector3<f64>,
) -> Vector3<f64> {
    let r = mrp_to_rotation(sigma);
    let w = r * omega_it_t;
    let dw = r * dot_omega_it_t;
    -skew(&w) * jc * w - jc * dw
}

// ---------------------------------------------------------------------------
// Translational coupling (C2, D2)
// ---------------------------------------------------------------------------

/// Coriolis matrix C2 of the relative translation: `-[omega_ic]x`, where
/// `omega_ic = omega + R_t^c omega_it_t` is the chaser frame's inertial rate.
pub fn translational_coriolis(
    omega: &Vector3<f64>,
    sigma: &Vector3<f64>,
    omega_it_t: &Vector3<f64>,
) -> Matrix3<f64> {
    let omega_ic = omega + mrp_to_rotation(sigma) * omega_it_t;
    -skew(&omega_ic)
}

/// Disturbance D2: two-body gravity at `r_c` minus the target's inertial
/// acceleration brought into the chaser frame.
///
/// `D2 = -mu / |r_c|^3 r_c - R_t^c dot_v_t`
///
/// Fails with [`DynamicsError::ZeroSeparation`] when `r_c` is the zero vector,
/// and with [`DynamicsError::NonFinite`] when any input or the result is NaN
/// or infinite.
pub fn translational_disturbance(
    mu: f64,
    r_c: &Vector3<f64>,
    sigma: &Vector3<f64>,
    dot_v_t: &Vector3<f64>,
) -> Result<Vector3<f64>, DynamicsError> {
    let d2 = point_mass_accel(mu, r_c)? - mrp_to_rotation(sigma) * dot_v_t;
    if d2.iter().any(|c| !c.is_finite()) {
        return Err(DynamicsError::NonFinite("D2"));
    }
    Ok(d2)
}
