use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::units::Degrees;
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lens {
    pub fov: Degrees,
    pub near: f32,
    pub far: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov: Degrees(60.0),
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    pub lens: Lens,
    aspect: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(lens: Lens, viewport: Viewport) -> Self {
        let aspect = viewport.aspect().unwrap_or(1.0);
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            lens,
            aspect,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Returns false and leaves the projection alone for a collapsed viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        let Some(aspect) = viewport.aspect() else {
            return false;
        };
        self.aspect = aspect;
        self.update_projection();
        true
    }

    pub fn place(&mut self, position: Vec3, look_at: Vec3) {
        self.position = position;
        self.look_at = look_at;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, self.up)
    }

    pub fn mvp_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    fn update_projection(&mut self) {
        let Lens { fov, near, far } = self.lens;
        self.projection = Mat4::perspective_rh(fov.to_radians().0, self.aspect, near, far);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_updates_projection() {
        let mut camera = Camera::new(Lens::default(), Viewport::new(1200.0, 800.0));
        let before = camera.projection_matrix();
        assert!(camera.set_viewport(Viewport::new(800.0, 800.0)));
        assert_eq!(camera.aspect(), 1.0);
        assert_ne!(before, camera.projection_matrix());
    }

    #[test]
    fn test_collapsed_viewport_skipped() {
        let mut camera = Camera::new(Lens::default(), Viewport::new(1200.0, 800.0));
        let before = camera.projection_matrix();
        assert!(!camera.set_viewport(Viewport::new(1200.0, 0.0)));
        assert_eq!(camera.aspect(), 1.5);
        assert_eq!(before, camera.projection_matrix());
        assert!(camera.projection_matrix().is_finite());
    }

    #[test]
    fn test_looks_at_target() {
        let mut camera = Camera::new(Lens::default(), Viewport::new(1000.0, 1000.0));
        camera.place(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO);
        let origin = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5);
    }
}
