pub mod coupling;
pub mod kinematics;
pub mod relative;
pub mod state;

pub use coupling::{
    attitude_coriolis, attitude_disturbance, translational_coriolis, translational_disturbance,
};
pub use kinematics::{mrp_kinematic_matrix, mrp_shadow, mrp_to_rotation, skew};
pub use relative::RelativeDynamicsModel;
pub use state::{ChaserParams, ControlInput, RelativeState, StateDeriv, TargetKinematics};
