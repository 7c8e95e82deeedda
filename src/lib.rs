pub mod dynamics;
pub mod error;
pub mod gnc;
pub mod io;
pub mod physics;
pub mod sim;

pub use dynamics::{
    ChaserParams, ControlInput, RelativeDynamicsModel, RelativeState, StateDeriv, TargetKinematics,
};
pub use error::{DynamicsError, LogError, SimError};
pub use physics::{CentralBody, EARTH, MU_EARTH};
