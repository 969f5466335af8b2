use crate::core::{CameraConfig, PickSphere};
use glam::{Vec2, Vec3, Vec4};

/// Ray parameter of the nearest non-negative hit, if any.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let near = -b - sq;
    if near >= 0.0 {
        return Some(near);
    }
    // origin inside the sphere
    let far = -b + sq;
    (far >= 0.0).then_some(far)
}

/// World-space ray through pixel `px` of a `width` x `height` surface.
///
/// Returns `(ray_origin, ray_direction)`.
pub fn screen_to_world_ray(camera: &CameraConfig, width: f32, height: f32, px: Vec2) -> (Vec3, Vec3) {
    let width = width.max(1.0);
    let height = height.max(1.0);
    let ndc_x = (2.0 * px.x / width) - 1.0;
    let ndc_y = 1.0 - (2.0 * px.y / height);
    let inv = (camera.projection_matrix(width / height) * camera.view_matrix()).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let ro = camera.eye();
    let rd = (p1 - ro).normalize_or_zero();
    (ro, rd)
}

/// Index of the closest sphere hit by the ray. `None` slots are never hit
/// but keep the indices of the spheres after them.
pub fn pick(ray_origin: Vec3, ray_dir: Vec3, spheres: &[Option<PickSphere>]) -> Option<usize> {
    let mut best = None::<(usize, f32)>;
    for (i, s) in spheres.iter().enumerate() {
        let Some(s) = s else { continue };
        if let Some(t) = ray_sphere(ray_origin, ray_dir, s.center, s.radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}
