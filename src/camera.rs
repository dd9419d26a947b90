use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::config::{CAMERA_FOV_Y, CAMERA_HEIGHT, CAMERA_Z_FAR, CAMERA_Z_NEAR};

/// Right-handed perspective camera looking at the grid.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera placement derived from the grid side, matching the reference
    /// scene: eye at (side/7, 1.5, side/3) with integer division, aimed at
    /// the origin.
    pub fn for_grid(side: usize, aspect: f32) -> Self {
        Self {
            eye: Vec3::new((side / 7) as f32, CAMERA_HEIGHT, (side / 3) as f32),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_Y,
            znear: CAMERA_Z_NEAR,
            zfar: CAMERA_Z_FAR,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through the pixel at `screen` for a surface of
    /// `width` x `height` pixels. Returns (origin, direction).
    pub fn ray_from_screen(&self, screen: Vec2, width: f32, height: f32) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * screen.x / width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen.y / height.max(1.0));
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p_far: Vec3 = p_far.truncate() / p_far.w;
        let dir = (p_far - self.eye).normalize();
        (self.eye, dir)
    }
}

/// Nearest intersection distance of a ray with a sphere, if it hits in
/// front of the origin.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::for_grid(41, 1.0);
        let (origin, dir) = camera.ray_from_screen(Vec2::new(400.0, 300.0), 800.0, 600.0);
        assert_eq!(origin, camera.eye);
        let expected = (camera.target - camera.eye).normalize();
        assert!((dir - expected).length() < 1e-4, "dir {dir} vs {expected}");
    }

    #[test]
    fn test_ray_sphere_direct_hit() {
        let t = ray_sphere(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, 1.0);
        assert_eq!(t, Some(9.0));
    }

    #[test]
    fn test_ray_sphere_miss() {
        let t = ray_sphere(Vec3::new(0.0, 5.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, 1.0);
        assert_eq!(t, None);
    }

    #[test]
    fn test_ray_sphere_behind_origin() {
        let t = ray_sphere(Vec3::new(0.0, 0.0, -10.0), Vec3::NEG_Z, Vec3::ZERO, 1.0);
        assert_eq!(t, None);
    }

    #[test]
    fn test_camera_eye_uses_integer_division() {
        let camera = Camera::for_grid(41, 1.6);
        assert_eq!(camera.eye, Vec3::new(5.0, 1.5, 13.0));
    }
}
