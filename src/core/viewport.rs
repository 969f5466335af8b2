//! Camera and the world-space extent visible at the focus plane.

use crate::constants::{
    CAMERA_FOV_Y_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR, NARROW_FONT_DIVISOR,
    SPHERE_OFFSET_DIVISOR, SPHERE_SCALE_DIVISOR, WIDE_FONT_SIZE, WIDE_VIEWPORT_WIDTH,
};
use glam::{Mat4, Vec3};

/// Fixed camera on the +Z axis looking at the origin.
#[derive(Clone, Copy, Debug)]
pub struct CameraConfig {
    pub eye_z: f32,
    pub fov_y_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye_z: CAMERA_Z,
            fov_y_degrees: CAMERA_FOV_Y_DEG,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl CameraConfig {
    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.eye_z)
    }

    pub fn fov_y_radians(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians(), aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }
}

/// World-space width and height visible at z = 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn at_origin(camera: &CameraConfig, aspect: f32) -> Self {
        let height = 2.0 * camera.eye_z * (camera.fov_y_radians() / 2.0).tan();
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Self {
            width: height * aspect,
            height,
        }
    }

    pub fn reel_font_size(&self) -> f32 {
        if self.width > WIDE_VIEWPORT_WIDTH {
            WIDE_FONT_SIZE
        } else {
            self.width / NARROW_FONT_DIVISOR
        }
    }

    /// Lower-left and upper-right sphere centers.
    pub fn sphere_positions(&self) -> [Vec3; 2] {
        let x = self.width / SPHERE_OFFSET_DIVISOR;
        let y = self.height / SPHERE_OFFSET_DIVISOR;
        [Vec3::new(-x, -y, 0.0), Vec3::new(x, y, 0.0)]
    }

    pub fn sphere_scale(&self) -> Vec3 {
        Vec3::splat(self.width / SPHERE_SCALE_DIVISOR)
    }
}
