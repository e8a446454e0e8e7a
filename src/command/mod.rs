// src/command/mod.rs
pub mod parser;
pub mod reply;

#[cfg(test)]
mod parser_tests;

pub use parser::{parse_command, Command, CommandError};
pub use reply::{ArmStatus, Reply, SystemStatus};

use std::net::SocketAddr;

use crate::arm::Arm;

/// Turns one request into one reply. Holds no per-client state beyond the
/// advisory peer set.
#[derive(Clone)]
pub struct CommandProcessor {
    arm: Arm,
}

impl CommandProcessor {
    pub fn new(arm: Arm) -> Self {
        Self { arm }
    }

    pub fn arm(&self) -> &Arm {
        &self.arm
    }

    /// Decode a raw datagram and process it.
    pub async fn process_datagram(&self, data: &[u8], peer: SocketAddr) -> Reply {
        match std::str::from_utf8(data) {
            Ok(line) => self.process_line(line, peer).await,
            Err(e) => {
                tracing::warn!("Undecodable datagram from {}: {}", peer, e);
                Reply::Error(e.to_string())
            }
        }
    }

    pub async fn process_line(&self, line: &str, peer: SocketAddr) -> Reply {
        tracing::debug!("Command from {}: [{}]", peer, line.trim());
        let reply = match parse_command(line, self.arm.joint_count()) {
            Ok(command) => self.execute(command, peer).await,
            Err(e) if e.is_unknown() => {
                tracing::warn!("{} (from {})", e, peer);
                Reply::Error(e.to_string())
            }
            Err(e) => {
                tracing::warn!("Rejected command from {}: {}", peer, e);
                Reply::Ng
            }
        };
        tracing::debug!("Reply to {}: [{}]", peer, reply);
        reply
    }

    pub async fn execute(&self, command: Command, peer: SocketAddr) -> Reply {
        match command {
            Command::Connect => {
                self.arm.peers().add(peer).await;
                tracing::info!("Client connected: {}", peer);
                Reply::Ok
            }
            Command::Disconnect => {
                self.arm.peers().remove(&peer).await;
                tracing::info!("Client disconnected: {}", peer);
                Reply::Ok
            }
            Command::GetJointAngles => Reply::Angles(self.arm.joints().angles().await),
            Command::SetJointAngle { joint, angle_deg, speed } => {
                match self.arm.motion().move_joint(joint, angle_deg, speed).await {
                    Ok(()) => {
                        tracing::info!("Joint {} -> {}° at {}°/s", joint, angle_deg, speed);
                        Reply::Ok
                    }
                    Err(e) => {
                        tracing::warn!("SET_JOINT_ANGLE failed: {}", e);
                        Reply::Ng
                    }
                }
            }
            Command::SetAllJointAngles { angles_deg, speed } => {
                for (joint, angle_deg) in angles_deg.iter().enumerate() {
                    if let Err(e) = self.arm.motion().move_joint(joint, *angle_deg, speed).await {
                        tracing::warn!("SET_ALL_JOINT_ANGLES failed: {}", e);
                        return Reply::Ng;
                    }
                }
                tracing::info!("All joints -> {:?} at {}°/s", angles_deg, speed);
                Reply::Ok
            }
            Command::EmergencyStop => {
                self.arm.motion().emergency_stop().await;
                Reply::Ok
            }
            Command::GetSystemStatus => Reply::Status(self.arm.status().await),
        }
    }
}
