use anyhow::{Context, Result};
use glam::Vec3;
use log::info;

use crate::camera::PerspectiveCamera;
use crate::geometry::BoxGeometry;
use crate::scene::{color_from_hex, Light, Material, Mesh, Scene};

pub const FIELD_OF_VIEW_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 5.0;

pub const SOLID_CUBE_NAME: &str = "Cube";
pub const SOLID_CUBE_COLOR: u32 = 0xff0051;
/// Per-frame rotation increment in radians, tuned visually.
pub const SOLID_CUBE_SPIN: f32 = 0.04;

pub const WIREFRAME_CUBE_NAME: &str = "WireframeCube";
pub const WIREFRAME_CUBE_COLOR: u32 = 0xdadada;
/// Per-frame rotation increment in radians, tuned visually.
pub const WIREFRAME_CUBE_SPIN: f32 = -0.01;

pub const AMBIENT_LIGHT_INTENSITY: f32 = 0.5;
pub const POINT_LIGHT_INTENSITY: f32 = 3.0;
pub const POINT_LIGHT_POSITION: Vec3 = Vec3::new(25.0, 50.0, 25.0);

/// Everything the frame-tick and resize handlers operate on, constructed
/// once at startup and passed around explicitly.
#[derive(Debug, Clone)]
pub struct SceneContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    viewport: (u32, u32),
}

/// Assembles the fixed demo scene for the given viewport dimensions.
///
/// The scene always ends up with exactly four entities: the solid cube, the
/// wireframe cube, an ambient light and a point light.
pub fn bootstrap(width: u32, height: u32) -> Result<SceneContext> {
    let mut scene = Scene::new();

    let solid = Mesh::new(
        SOLID_CUBE_NAME,
        BoxGeometry::new(1.0, 1.0, 1.0),
        Material::lit(color_from_hex(SOLID_CUBE_COLOR)),
    )
    .with_spin(Vec3::new(SOLID_CUBE_SPIN, SOLID_CUBE_SPIN, 0.0));
    scene.add_mesh(solid).context("failed to add solid cube")?;

    let wireframe = Mesh::new(
        WIREFRAME_CUBE_NAME,
        BoxGeometry::new(3.0, 3.0, -3.0),
        Material::unlit(color_from_hex(WIREFRAME_CUBE_COLOR))
            .with_wireframe()
            .with_transparency(),
    )
    .with_spin(Vec3::new(WIREFRAME_CUBE_SPIN, WIREFRAME_CUBE_SPIN, 0.0));
    scene
        .add_mesh(wireframe)
        .context("failed to add wireframe cube")?;

    scene
        .add_light(Light::ambient(
            "Ambient",
            color_from_hex(0xffffff),
            AMBIENT_LIGHT_INTENSITY,
        ))
        .context("failed to add ambient light")?;
    scene
        .add_light(Light::point(
            "Point",
            color_from_hex(0xffffff),
            POINT_LIGHT_INTENSITY,
            POINT_LIGHT_POSITION,
        ))
        .context("failed to add point light")?;

    let mut camera = PerspectiveCamera::new(
        FIELD_OF_VIEW_DEGREES,
        aspect_ratio(width, height),
        NEAR_PLANE,
        FAR_PLANE,
    );
    camera.position = Vec3::new(0.0, 0.0, CAMERA_DISTANCE);

    info!(
        "bootstrapped scene with {} meshes and {} lights",
        scene.meshes().len(),
        scene.lights().len()
    );

    Ok(SceneContext {
        scene,
        camera,
        viewport: (width.max(1), height.max(1)),
    })
}

impl SceneContext {
    /// Applies one frame tick: every mesh accumulates its spin increment.
    ///
    /// Rotations accumulate without wrapping, matching how the loop mutates
    /// them; a full turn is render-equivalent either way.
    pub fn advance_frame(&mut self) {
        for mesh in self.scene.meshes_mut() {
            mesh.rotation += mesh.spin;
        }
    }

    /// Synchronizes the camera with new viewport dimensions.
    ///
    /// Zero-area sizes are ignored; repeating the same resize is a no-op.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.camera.set_aspect(aspect_ratio(width, height));
        self.camera.refresh_projection();
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{LightKind, Shading};

    #[test]
    fn bootstrap_yields_two_meshes_and_two_lights() {
        let ctx = bootstrap(800, 600).unwrap();
        assert_eq!(ctx.scene.entity_count(), 4);
        assert_eq!(ctx.scene.meshes().len(), 2);
        assert_eq!(ctx.scene.lights().len(), 2);

        let solid = ctx.scene.mesh(SOLID_CUBE_NAME).unwrap();
        assert_eq!(solid.material.shading, Shading::Lit);
        assert!(!solid.material.wireframe);

        let wireframe = ctx.scene.mesh(WIREFRAME_CUBE_NAME).unwrap();
        assert!(wireframe.material.wireframe);
        assert!(wireframe.material.transparent);
        assert_eq!(wireframe.geometry.depth, -3.0);

        assert!(ctx
            .scene
            .lights()
            .iter()
            .any(|light| light.kind == LightKind::Ambient));
        assert!(ctx.scene.lights().iter().any(|light| matches!(
            light.kind,
            LightKind::Point { position } if position == POINT_LIGHT_POSITION
        )));
    }

    #[test]
    fn camera_matches_the_fixed_parameters() {
        let ctx = bootstrap(800, 600).unwrap();
        assert_eq!(ctx.camera.fov_degrees, FIELD_OF_VIEW_DEGREES);
        assert_eq!(ctx.camera.near, NEAR_PLANE);
        assert_eq!(ctx.camera.far, FAR_PLANE);
        assert_eq!(ctx.camera.aspect, 800.0 / 600.0);
        assert_eq!(ctx.camera.position, Vec3::new(0.0, 0.0, CAMERA_DISTANCE));
    }

    #[test]
    fn rotations_accumulate_linearly_per_frame() {
        let mut ctx = bootstrap(800, 600).unwrap();
        for _ in 0..25 {
            ctx.advance_frame();
        }
        let solid = ctx.scene.mesh(SOLID_CUBE_NAME).unwrap();
        assert!((solid.rotation.x - 1.0).abs() < 1e-5);
        assert!((solid.rotation.y - 1.0).abs() < 1e-5);
        assert_eq!(solid.rotation.z, 0.0);

        let wireframe = ctx.scene.mesh(WIREFRAME_CUBE_NAME).unwrap();
        assert!((wireframe.rotation.x + 0.25).abs() < 1e-5);
        assert!((wireframe.rotation.y + 0.25).abs() < 1e-5);
    }

    #[test]
    fn resize_updates_only_the_camera() {
        let mut ctx = bootstrap(800, 600).unwrap();
        let meshes_before = ctx.scene.meshes().to_vec();
        let lights_before = ctx.scene.lights().to_vec();

        ctx.resize(1024, 768);
        assert_eq!(ctx.viewport(), (1024, 768));
        assert_eq!(ctx.camera.aspect, 1024.0 / 768.0);
        assert_eq!(ctx.scene.meshes(), meshes_before.as_slice());
        assert_eq!(ctx.scene.lights(), lights_before.as_slice());
    }

    #[test]
    fn repeated_resize_is_idempotent() {
        let mut ctx = bootstrap(800, 600).unwrap();
        ctx.resize(1024, 768);
        let camera = ctx.camera.clone();
        ctx.resize(1024, 768);
        assert_eq!(ctx.camera, camera);
        assert_eq!(ctx.viewport(), (1024, 768));
    }

    #[test]
    fn zero_area_resizes_are_ignored() {
        let mut ctx = bootstrap(800, 600).unwrap();
        ctx.resize(0, 768);
        ctx.resize(1024, 0);
        assert_eq!(ctx.viewport(), (800, 600));
        assert_eq!(ctx.camera.aspect, 800.0 / 600.0);
    }
}
