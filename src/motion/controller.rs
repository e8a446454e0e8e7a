// src/motion/controller.rs - Per-joint motion tasks with supersede and emergency stop
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::MotionConfig;
use crate::hardware::{pulse, JointStore};
use crate::motion::planner::MotionPlan;
use crate::motion::MotionError;

/// A running interpolation for one joint.
struct MotionTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl MotionTask {
    fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel and wait up to `wait` for the task to exit. A task that does not
    /// exit in time is aborted so it can never write again.
    async fn stop(self, joint: usize, wait: Duration) {
        self.cancel.cancel();
        let mut handle = self.handle;
        if tokio::time::timeout(wait, &mut handle).await.is_err() {
            tracing::warn!("Motion task for joint {} did not stop within {:?}, aborting", joint, wait);
            handle.abort();
        }
    }
}

/// Animates joints toward commanded angles. Each joint has at most one live
/// task; a new command for a joint stops its previous task first, other
/// joints are never touched.
pub struct MotionController {
    joints: Arc<JointStore>,
    tasks: Vec<Mutex<Option<MotionTask>>>,
    config: MotionConfig,
}

impl MotionController {
    pub fn new(joints: Arc<JointStore>, config: MotionConfig) -> Self {
        let tasks = (0..joints.len()).map(|_| Mutex::new(None)).collect();
        tracing::info!(
            "Motion controller ready: {} joints, {} Hz animation",
            joints.len(),
            config.update_rate_hz
        );
        Self { joints, tasks, config }
    }

    pub fn joints(&self) -> &Arc<JointStore> {
        &self.joints
    }

    /// Start moving `joint` toward `target_deg` at `speed` deg/s.
    ///
    /// Returns once the move is scheduled, not when it completes.
    pub async fn move_joint(&self, joint: usize, target_deg: f64, speed: f64) -> Result<(), MotionError> {
        let slot = self.tasks.get(joint).ok_or(MotionError::InvalidJoint {
            joint,
            count: self.tasks.len(),
        })?;
        // Held until the new task is registered, so two commands for the same
        // joint cannot both spawn.
        let mut slot = slot.lock().await;
        if let Some(previous) = slot.take() {
            previous.stop(joint, self.config.supersede_timeout()).await;
        }

        let start = self.joints.get(joint).await.ok_or(MotionError::InvalidJoint {
            joint,
            count: self.joints.len(),
        })?;
        let Some(plan) = MotionPlan::new(start.angle_deg, target_deg, speed, self.config.update_rate_hz) else {
            tracing::debug!("Joint {} already at {:.2}°", joint, target_deg);
            return Ok(());
        };

        tracing::debug!(
            "Joint {} moving {:.1}° -> {:.1}° ({:.1}s, {} steps)",
            joint,
            plan.start_deg,
            plan.target_deg,
            plan.duration.as_secs_f64(),
            plan.steps
        );
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_motion(
            self.joints.clone(),
            joint,
            plan,
            cancel.clone(),
            self.config.step_interval(),
            self.steps_per_second(),
        ));
        *slot = Some(MotionTask { cancel, handle });
        Ok(())
    }

    /// Halt every joint where it is. Returns the number of joints that were moving.
    ///
    /// When this returns no motion task will write joint state again.
    pub async fn emergency_stop(&self) -> usize {
        let mut halted = Vec::new();
        for (joint, slot) in self.tasks.iter().enumerate() {
            if let Some(task) = slot.lock().await.take() {
                task.cancel.cancel();
                halted.push((joint, task));
            }
        }
        let moving = halted.iter().filter(|(_, task)| !task.is_finished()).count();
        let wait = self.config.supersede_timeout();
        join_all(halted.into_iter().map(|(joint, task)| task.stop(joint, wait))).await;
        tracing::info!("Emergency stop: {} joints halted", moving);
        moving
    }

    pub async fn is_moving(&self, joint: usize) -> bool {
        match self.tasks.get(joint) {
            Some(slot) => slot.lock().await.as_ref().is_some_and(|task| !task.is_finished()),
            None => false,
        }
    }

    pub async fn active_motions(&self) -> usize {
        let mut count = 0;
        for joint in 0..self.tasks.len() {
            if self.is_moving(joint).await {
                count += 1;
            }
        }
        count
    }

    pub async fn shutdown(&self) {
        tracing::info!("Motion controller shutting down");
        self.emergency_stop().await;
    }

    fn steps_per_second(&self) -> u64 {
        (self.config.update_rate_hz.round() as u64).max(1)
    }
}

async fn run_motion(
    joints: Arc<JointStore>,
    joint: usize,
    plan: MotionPlan,
    cancel: CancellationToken,
    interval: Duration,
    log_every: u64,
) {
    let max_angle = joints.max_angle();
    let started = Instant::now();
    for step in 0..=plan.steps {
        if cancel.is_cancelled() {
            tracing::debug!("Joint {} motion interrupted", joint);
            return;
        }
        let (angle, pulse_units) = pulse::quantize(plan.angle_at(step), max_angle);
        joints.set(joint, angle, pulse_units).await;
        if step % log_every == 0 {
            tracing::debug!(
                "Joint {}: {:.1}° ({:.0}%) [{:.1}s]",
                joint,
                angle,
                plan.progress(step) * 100.0,
                started.elapsed().as_secs_f64()
            );
        }
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Joint {} motion interrupted", joint);
                return;
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }
    // Land exactly on the target rather than the last interpolated value.
    let (angle, pulse_units) = pulse::quantize(plan.target_deg, max_angle);
    joints.set(joint, angle, pulse_units).await;
    tracing::debug!("Joint {} motion complete: {:.2}°", joint, angle);
}
