use nalgebra::{Cholesky, Matrix3, Vector3};

use crate::error::DynamicsError;

// ---------------------------------------------------------------------------
// Relative state: attitude MRP, angular rate, position, velocity
// ---------------------------------------------------------------------------

/// Chaser state relative to the target. Everything is expressed in the
/// chaser frame except `sigma`, which maps the target frame to the chaser frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeState {
    pub sigma: Vector3<f64>, // MRP, chaser relative to target
    pub omega: Vector3<f64>, // rad/s
    pub rho: Vector3<f64>,   // m
    pub v: Vector3<f64>,     // m/s
}

impl RelativeState {
    pub fn new(
        sigma: Vector3<f64>,
        omega: Vector3<f64>,
        rho: Vector3<f64>,
        v: Vector3<f64>,
    ) -> Self {
        Self { sigma, omega, rho, v }
    }

    /// Build from loosely-shaped input, e.g. values read from a file.
    pub fn from_slices(
        sigma: &[f64],
        omega: &[f64],
        rho: &[f64],
        v: &[f64],
    ) -> Result<Self, DynamicsError> {
        Ok(Self {
            sigma: vector3_from_slice("sigma", sigma)?,
            omega: vector3_from_slice("omega", omega)?,
            rho: vector3_from_slice("rho", rho)?,
            v: vector3_from_slice("v", v)?,
        })
    }

    /// Advance state by a derivative scaled by dt (used inside RK4).
    pub fn apply(&self, d: &StateDeriv, dt: f64) -> RelativeState {
        RelativeState {
            sigma: self.sigma + d.dsigma * dt,
            omega: self.omega + d.domega * dt,
            rho: self.rho + d.drho * dt,
            v: self.v + d.dv * dt,
        }
    }

    /// Separation between the two spacecraft, m.
    pub fn range(&self) -> f64 {
        self.rho.norm()
    }

    /// Rate of change of the separation, m/s. Negative while closing.
    pub fn range_rate(&self) -> f64 {
        let r = self.range();
        if r < 1e-9 {
            return 0.0;
        }
        self.rho.dot(&self.v) / r
    }
}

impl Default for RelativeState {
    fn default() -> Self {
        Self::new(
            Vector3::zeros(),
            Vector3::zeros(),
            Vector3::zeros(),
            Vector3::zeros(),
        )
    }
}

// ---------------------------------------------------------------------------
// State derivative
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateDeriv {
    pub dsigma: Vector3<f64>, // MRP rate
    pub domega: Vector3<f64>, // relative angular acceleration
    pub drho: Vector3<f64>,   // relative velocity
    pub dv: Vector3<f64>,     // relative acceleration
}

// ---------------------------------------------------------------------------
// Chaser physical parameters
// ---------------------------------------------------------------------------

/// Mass properties of the chaser. Fixed for the lifetime of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaserParams {
    mass: f64,              // kg
    inertia: Matrix3<f64>,  // kg m^2, body frame
    inertia_inv: Matrix3<f64>,
}

impl ChaserParams {
    /// Validate mass (> 0) and inertia (symmetric positive-definite).
    pub fn new(mass: f64, inertia: Matrix3<f64>) -> Result<Self, DynamicsError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(DynamicsError::NonPositiveMass(mass));
        }
        if inertia.iter().any(|c| !c.is_finite()) {
            return Err(DynamicsError::NonFinite("inertia"));
        }
        let scale = inertia.amax();
        if (inertia - inertia.transpose()).amax() > 1e-9 * scale {
            return Err(DynamicsError::InertiaNotSymmetric);
        }
        let inertia_inv = Cholesky::new(inertia)
            .ok_or(DynamicsError::InertiaNotPositiveDefinite)?
            .inverse();
        Ok(Self {
            mass,
            inertia,
            inertia_inv,
        })
    }

    /// Principal-axis inertia.
    pub fn diagonal(mass: f64, ixx: f64, iyy: f64, izz: f64) -> Result<Self, DynamicsError> {
        Self::new(mass, Matrix3::from_diagonal(&Vector3::new(ixx, iyy, izz)))
    }

    /// Inertia given as 9 row-major components.
    pub fn from_slices(mass: f64, inertia: &[f64]) -> Result<Self, DynamicsError> {
        if inertia.len() != 9 {
            return Err(DynamicsError::Shape {
                quantity: "inertia",
                expected: 9,
                actual: inertia.len(),
            });
        }
        Self::new(mass, Matrix3::from_row_slice(inertia))
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inertia(&self) -> &Matrix3<f64> {
        &self.inertia
    }

    pub fn inertia_inv(&self) -> &Matrix3<f64> {
        &self.inertia_inv
    }
}

// ---------------------------------------------------------------------------
// Target kinematics (external input, sampled per evaluation)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetKinematics {
    pub omega_it_t: Vector3<f64>,     // target inertial angular rate, target frame
    pub dot_omega_it_t: Vector3<f64>, // its time derivative, target frame
    pub r_c: Vector3<f64>,            // absolute position in the gravity term, chaser frame
    pub dot_v_t: Vector3<f64>,        // target inertial acceleration, target frame
}

impl TargetKinematics {
    pub fn from_slices(
        omega_it_t: &[f64],
        dot_omega_it_t: &[f64],
        r_c: &[f64],
        dot_v_t: &[f64],
    ) -> Result<Self, DynamicsError> {
        Ok(Self {
            omega_it_t: vector3_from_slice("omega_it_t", omega_it_t)?,
            dot_omega_it_t: vector3_from_slice("dot_omega_it_t", dot_omega_it_t)?,
            r_c: vector3_from_slice("r_c", r_c)?,
            dot_v_t: vector3_from_slice("dot_v_t", dot_v_t)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Control input
// ---------------------------------------------------------------------------

/// Applied force and torque, chaser frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlInput {
    pub force: Vector3<f64>,  // N
    pub torque: Vector3<f64>, // N m
}

impl ControlInput {
    pub fn new(force: Vector3<f64>, torque: Vector3<f64>) -> Self {
        Self { force, torque }
    }
}

impl Default for ControlInput {
    fn default() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros())
    }
}

/// Checked conversion of a slice into a 3-vector.
pub fn vector3_from_slice(
    quantity: &'static str,
    s: &[f64],
) -> Result<Vector3<f64>, DynamicsError> {
    if s.len() != 3 {
        return Err(DynamicsError::Shape {
            quantity,
            expected: 3,
            actual: s.len(),
        });
    }
    Ok(Vector3::new(s[0], s[1], s[2]))
}
