use crate::constants::{FLOAT_INTENSITY, FLOAT_ROTATION_INTENSITY, FLOAT_SPEED};
use glam::Vec3;

/// Gentle idle bobbing and tilting applied to a wrapper group.
#[derive(Clone, Copy, Debug)]
pub struct FloatConfig {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            speed: FLOAT_SPEED,
            rotation_intensity: FLOAT_ROTATION_INTENSITY,
            float_intensity: FLOAT_INTENSITY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatPose {
    pub rotation: Vec3,
    pub offset_y: f32,
}

impl FloatConfig {
    /// Pose at `elapsed_sec` plus a per-object phase offset.
    pub fn sample(&self, elapsed_sec: f32, phase: f32) -> FloatPose {
        let t = (elapsed_sec + phase) * self.speed / 4.0;
        let (s, c) = t.sin_cos();
        FloatPose {
            rotation: Vec3::new(c / 8.0, s / 8.0, s / 20.0) * self.rotation_intensity,
            offset_y: s / 10.0 * self.float_intensity,
        }
    }
}
