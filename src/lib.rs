// src/lib.rs - Simulated robot-arm controller reachable over UDP
pub mod arm;
pub mod command;
pub mod communication;
pub mod config;
pub mod hardware;
pub mod motion;

pub use arm::Arm;
pub use command::{Command, CommandError, CommandProcessor, Reply, SystemStatus};
pub use communication::{ArmClient, ClientError, ServerError, UdpServer};
pub use config::{Config, ConfigError};
pub use hardware::{JointState, JointStore};
pub use motion::{MotionController, MotionError};
