// src/arm.rs - Server context shared by the dispatcher and the transport
use std::sync::Arc;

use crate::command::reply::{ArmStatus, SystemStatus};
use crate::communication::peers::ConnectedPeers;
use crate::config::Config;
use crate::hardware::JointStore;
use crate::motion::MotionController;

/// Everything one simulated arm owns. Cheap to clone; clones share state,
/// separate `Arm::new` calls do not.
#[derive(Clone)]
pub struct Arm {
    config: Arc<Config>,
    joints: Arc<JointStore>,
    motion: Arc<MotionController>,
    peers: Arc<ConnectedPeers>,
}

impl Arm {
    pub fn new(config: &Config) -> Self {
        let joints = Arc::new(JointStore::new(config.arm.joints, config.arm.max_angle));
        let motion = Arc::new(MotionController::new(joints.clone(), config.motion.clone()));
        Self {
            config: Arc::new(config.clone()),
            joints,
            motion,
            peers: Arc::new(ConnectedPeers::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn joints(&self) -> &Arc<JointStore> {
        &self.joints
    }

    pub fn motion(&self) -> &Arc<MotionController> {
        &self.motion
    }

    pub fn peers(&self) -> &Arc<ConnectedPeers> {
        &self.peers
    }

    pub async fn status(&self) -> SystemStatus {
        let status = if self.motion.active_motions().await > 0 {
            ArmStatus::Moving
        } else {
            ArmStatus::Ready
        };
        SystemStatus {
            status,
            joints: self.joints.angles().await,
            connected_clients: self.peers.len().await,
        }
    }

    /// Stop all motion. Called before the transport releases its socket.
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down arm");
        self.motion.shutdown().await;
    }
}
