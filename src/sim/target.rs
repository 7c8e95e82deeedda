use nalgebra::Vector3;

use crate::dynamics::kinematics::mrp_to_rotation;
use crate::dynamics::state::{RelativeState, TargetKinematics};
use crate::error::DynamicsError;
use crate::physics::gravity::CentralBody;

// ---------------------------------------------------------------------------
// Target motion providers
// ---------------------------------------------------------------------------

/// Source of the target's kinematic state, sampled once per derivative
/// evaluation.
pub trait TargetMotion {
    /// Target kinematics at `time`, given the relative state being evaluated
    /// (the gravity term needs the chaser's absolute position).
    fn kinematics(&self, time: f64, state: &RelativeState) -> TargetKinematics;
}

/// Fixed kinematics, independent of time and state.
#[derive(Debug, Clone, Copy)]
pub struct StaticTarget(pub TargetKinematics);

impl TargetMotion for StaticTarget {
    fn kinematics(&self, _time: f64, _state: &RelativeState) -> TargetKinematics {
        self.0
    }
}

/// Target on a circular orbit, its frame locked to the orbit:
/// x radial, z along the orbit normal, rotating at the mean motion.
#[derive(Debug, Clone, Copy)]
pub struct CircularOrbitTarget {
    body: CentralBody,
    radius: f64, // m
}

impl CircularOrbitTarget {
    pub fn new(body: CentralBody, radius: f64) -> Result<Self, DynamicsError> {
        if !radius.is_finite() {
            return Err(DynamicsError::NonFinite("orbit radius"));
        }
        if radius <= 0.0 {
            return Err(DynamicsError::ZeroSeparation);
        }
        Ok(Self { body, radius })
    }

    pub fn from_altitude(body: CentralBody, altitude: f64) -> Result<Self, DynamicsError> {
        Self::new(body, body.radius + altitude)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mean_motion(&self) -> f64 {
        self.body.mean_motion(self.radius)
    }

    /// Orbital period, s.
    pub fn period(&self) -> f64 {
        2.0 * std::f64::consts::PI / self.mean_motion()
    }
}

impl TargetMotion for CircularOrbitTarget {
    fn kinematics(&self, _time: f64, state: &RelativeState) -> TargetKinematics {
        let a = self.radius;
        let r_t = Vector3::new(a, 0.0, 0.0);
        TargetKinematics {
            omega_it_t: Vector3::new(0.0, 0.0, self.mean_motion()),
            dot_omega_it_t: Vector3::zeros(),
            r_c: mrp_to_rotation(&state.sigma) * r_t + state.rho,
            dot_v_t: Vector3::new(-self.body.mu / (a * a), 0.0, 0.0),
        }
    }
}
