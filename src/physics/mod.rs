pub mod gravity;

pub use gravity::{point_mass_accel, CentralBody, EARTH, MU_EARTH};
