use nalgebra::Vector3;

use crate::error::DynamicsError;

// ---------------------------------------------------------------------------
// Central body constants
// ---------------------------------------------------------------------------

pub const MU_EARTH: f64 = 3.986_004_418e14; // m^3/s^2
pub const R_EARTH: f64 = 6_378_137.0; // equatorial radius, m

/// Central body the relative motion takes place around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralBody {
    pub mu: f64,     // gravitational parameter, m^3/s^2
    pub radius: f64, // reference radius, m
}

pub const EARTH: CentralBody = CentralBody {
    mu: MU_EARTH,
    radius: R_EARTH,
};

impl CentralBody {
    pub fn new(mu: f64, radius: f64) -> Result<Self, DynamicsError> {
        if !(mu.is_finite() && mu > 0.0) {
            return Err(DynamicsError::InvalidGravitationalParameter(mu));
        }
        Ok(Self { mu, radius })
    }

    /// Mean motion of a circular orbit of radius `a` (rad/s).
    pub fn mean_motion(&self, a: f64) -> f64 {
        (self.mu / (a * a * a)).sqrt()
    }
}

impl Default for CentralBody {
    fn default() -> Self {
        EARTH
    }
}

/// Point-mass gravitational acceleration `-mu / |pos|^3 pos` at `pos`, in
/// whatever frame `pos` is expressed in.
///
/// The magnitude is built from a scaled norm so that neither very small nor
/// very large finite positions underflow or overflow on the way.
pub fn point_mass_accel(mu: f64, pos: &Vector3<f64>) -> Result<Vector3<f64>, DynamicsError> {
    if pos.iter().any(|c| !c.is_finite()) {
        return Err(DynamicsError::NonFinite("r_c"));
    }
    let scale = pos.amax();
    if scale == 0.0 {
        return Err(DynamicsError::ZeroSeparation);
    }
    let dir = pos / scale;
    let n = dir.norm();
    let r = scale * n;
    let accel = -(mu / r / r) * (dir / n);
    if accel.iter().any(|c| !c.is_finite()) {
        return Err(DynamicsError::NonFinite("gravity"));
    }
    Ok(accel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn surface_gravity_is_about_9_8() {
        let a = point_mass_accel(MU_EARTH, &Vector3::new(R_EARTH, 0.0, 0.0)).unwrap();
        assert!((a.x + 9.798).abs() < 0.01, "got {}", a.x);
        assert_eq!(a.y, 0.0);
    }

    #[test]
    fn zero_position_is_rejected() {
        assert_eq!(
            point_mass_accel(MU_EARTH, &Vector3::zeros()),
            Err(DynamicsError::ZeroSeparation)
        );
        assert_eq!(
            point_mass_accel(MU_EARTH, &Vector3::new(0.0, f64::INFINITY, 0.0)),
            Err(DynamicsError::NonFinite("r_c"))
        );
    }

    #[test]
    fn tiny_position_does_not_underflow() {
        // |pos|^3 = 1e-330 is below the smallest subnormal
        let a = point_mass_accel(MU_EARTH, &Vector3::new(1e-110, 0.0, 0.0)).unwrap();
        assert_relative_eq!(a.x, -MU_EARTH / 1e-220, max_relative = 1e-12);
        assert_eq!(a.y, 0.0);
        assert_eq!(a.z, 0.0);

        assert_eq!(
            point_mass_accel(MU_EARTH, &Vector3::new(1e-200, 0.0, 0.0)),
            Err(DynamicsError::NonFinite("gravity"))
        );
    }

    #[test]
    fn huge_position_is_not_an_overflow() {
        // |pos|^2 overflows if formed directly
        let pos = Vector3::new(3e200, 4e200, 0.0);
        let a = point_mass_accel(MU_EARTH, &pos).unwrap();
        assert!(a.iter().all(|c| c.is_finite()));
        assert!(a.x <= 0.0 && a.y <= 0.0);
    }

    #[test]
    fn leo_mean_motion() {
        let a = R_EARTH + 400_000.0;
        let period = 2.0 * std::f64::consts::PI / EARTH.mean_motion(a);
        // ~92.6 min
        assert_relative_eq!(period, 5553.6, epsilon = 5.0);
    }

    #[test]
    fn invalid_mu_rejected() {
        assert!(CentralBody::new(0.0, 1.0).is_err());
        assert!(CentralBody::new(f64::NAN, 1.0).is_err());
        assert!(CentralBody::new(4.9028e12, 1_737_400.0).is_ok());
    }
}
