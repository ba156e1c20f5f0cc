use glam::{Mat4, Vec3};

/// Perspective viewpoint used to project the scene.
///
/// The projection matrix is cached; after changing any projection field the
/// caller refreshes it explicitly, mirroring how the camera is driven from
/// the resize handler.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        camera.refresh_projection();
        camera
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Recomputes the cached projection matrix from the current fields.
    pub fn refresh_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect.max(0.01),
            self.near,
            self.far,
        );
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Combined projection and view matrix, looking at the origin.
    pub fn view_proj(&self) -> Mat4 {
        self.projection * Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_refreshes_the_projection() {
        let camera = PerspectiveCamera::new(75.0, 800.0 / 600.0, 0.1, 1000.0);
        assert_eq!(camera.aspect, 800.0 / 600.0);
        assert_ne!(camera.projection(), Mat4::IDENTITY);
    }

    #[test]
    fn aspect_changes_take_effect_on_refresh() {
        let mut camera = PerspectiveCamera::new(75.0, 800.0 / 600.0, 0.1, 1000.0);
        let before = camera.projection();

        camera.set_aspect(1024.0 / 768.0);
        assert_eq!(camera.projection(), before);

        camera.refresh_projection();
        assert_ne!(camera.projection(), before);
    }

    #[test]
    fn refreshing_twice_is_idempotent() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.set_aspect(1024.0 / 768.0);
        camera.refresh_projection();
        let first = camera.projection();
        camera.refresh_projection();
        assert_eq!(camera.projection(), first);
    }

    #[test]
    fn view_proj_depends_on_the_camera_position() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        let offset = camera.view_proj();
        camera.position = Vec3::new(0.0, 0.0, 10.0);
        assert_ne!(camera.view_proj(), offset);
    }
}
