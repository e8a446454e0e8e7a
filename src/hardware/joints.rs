// src/hardware/joints.rs - Per-joint servo state shared by motion tasks and status queries
use tokio::sync::RwLock;

use super::pulse;

/// What one servo is currently holding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointState {
    pub angle_deg: f64,
    pub pulse_units: u32,
}

/// In-memory servo table. Each joint sits behind its own lock, so readers
/// and writers of different joints never contend.
#[derive(Debug)]
pub struct JointStore {
    joints: Vec<RwLock<JointState>>,
    max_angle: f64,
}

impl JointStore {
    /// Create `count` joints resting at 0 degrees.
    pub fn new(count: usize, max_angle: f64) -> Self {
        let (angle_deg, pulse_units) = pulse::quantize(0.0, max_angle);
        let joints = (0..count)
            .map(|_| RwLock::new(JointState { angle_deg, pulse_units }))
            .collect();
        Self { joints, max_angle }
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn max_angle(&self) -> f64 {
        self.max_angle
    }

    pub fn contains(&self, joint: usize) -> bool {
        joint < self.joints.len()
    }

    pub async fn get(&self, joint: usize) -> Option<JointState> {
        match self.joints.get(joint) {
            Some(slot) => Some(*slot.read().await),
            None => None,
        }
    }

    /// Store angle and pulse together. Values are written as given.
    pub async fn set(&self, joint: usize, angle_deg: f64, pulse_units: u32) {
        match self.joints.get(joint) {
            Some(slot) => {
                *slot.write().await = JointState { angle_deg, pulse_units };
            }
            None => tracing::warn!("Ignoring write to unknown joint {}", joint),
        }
    }

    /// Read every joint in index order.
    pub async fn snapshot(&self) -> Vec<JointState> {
        let mut states = Vec::with_capacity(self.joints.len());
        for slot in &self.joints {
            states.push(*slot.read().await);
        }
        states
    }

    pub async fn angles(&self) -> Vec<f64> {
        self.snapshot().await.iter().map(|s| s.angle_deg).collect()
    }
}
