// src/hardware/mod.rs
// Simulated servo side of the arm: the pulse-width codec and the joint table.
pub mod joints;
pub mod pulse;

pub use joints::{JointState, JointStore};
pub use pulse::{angle_to_pulse, pulse_to_angle};
