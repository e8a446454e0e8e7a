// src/motion/mod.rs
pub mod controller;
pub mod planner;

pub use controller::MotionController;
pub use planner::MotionPlan;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MotionError {
    #[error("Invalid joint {joint} (arm has {count} joints)")]
    InvalidJoint { joint: usize, count: usize },
}
