use glam::Vec3;
use thiserror::Error;

use crate::geometry::BoxGeometry;

/// Scene membership errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("entity `{0}` is already part of the scene")]
    Duplicate(String),
}

/// Flat container of the renderable and light entities of one frame.
///
/// Entities are added once during bootstrap and never removed; the only
/// invariant the container enforces is uniqueness of membership by name.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> Result<(), SceneError> {
        self.check_name(&mesh.name)?;
        self.meshes.push(mesh);
        Ok(())
    }

    pub fn add_light(&mut self, light: Light) -> Result<(), SceneError> {
        self.check_name(light.name)?;
        self.lights.push(light);
        Ok(())
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|mesh| mesh.name == name)
    }

    /// Total number of entities (meshes and lights) in the scene.
    pub fn entity_count(&self) -> usize {
        self.meshes.len() + self.lights.len()
    }

    fn check_name(&self, name: &str) -> Result<(), SceneError> {
        let taken = self.meshes.iter().any(|mesh| mesh.name == name)
            || self.lights.iter().any(|light| light.name == name);
        if taken {
            Err(SceneError::Duplicate(name.to_string()))
        } else {
            Ok(())
        }
    }
}

/// Renderable entity pairing a geometry with a material.
///
/// `rotation` holds accumulated Euler angles in radians and is the only
/// per-frame mutable state; `spin` is the per-frame increment applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub geometry: BoxGeometry,
    pub material: Material,
    pub position: Vec3,
    pub rotation: Vec3,
    pub spin: Vec3,
}

impl Mesh {
    pub fn new(name: impl Into<String>, geometry: BoxGeometry, material: Material) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            spin: Vec3::ZERO,
        }
    }

    pub fn with_spin(mut self, spin: Vec3) -> Self {
        self.spin = spin;
        self
    }
}

/// Whether a material responds to scene lighting or is drawn flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    Lit,
    Unlit,
}

/// Surface appearance: color plus shading/wireframe/transparency flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub shading: Shading,
    pub wireframe: bool,
    pub transparent: bool,
}

impl Material {
    pub fn lit(color: Vec3) -> Self {
        Self {
            color,
            shading: Shading::Lit,
            wireframe: false,
            transparent: false,
        }
    }

    pub fn unlit(color: Vec3) -> Self {
        Self {
            color,
            shading: Shading::Unlit,
            wireframe: false,
            transparent: false,
        }
    }

    pub fn with_wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }

    pub fn with_transparency(mut self) -> Self {
        self.transparent = true;
        self
    }
}

/// Light source owned by the scene; immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub name: &'static str,
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Non-directional, uniform illumination.
    Ambient,
    /// Omnidirectional source at a fixed position.
    Point { position: Vec3 },
}

impl Light {
    pub fn ambient(name: &'static str, color: Vec3, intensity: f32) -> Self {
        Self {
            name,
            kind: LightKind::Ambient,
            color,
            intensity,
        }
    }

    pub fn point(name: &'static str, color: Vec3, intensity: f32, position: Vec3) -> Self {
        Self {
            name,
            kind: LightKind::Point { position },
            color,
            intensity,
        }
    }
}

/// Converts a packed `0xRRGGBB` value into linear color components.
pub fn color_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(name: &str) -> Mesh {
        Mesh::new(
            name,
            BoxGeometry::new(1.0, 1.0, 1.0),
            Material::lit(Vec3::ONE),
        )
    }

    #[test]
    fn add_and_look_up_entities() {
        let mut scene = Scene::new();
        scene.add_mesh(cube("Cube")).unwrap();
        scene
            .add_light(Light::ambient("Ambient", Vec3::ONE, 0.5))
            .unwrap();
        assert_eq!(scene.entity_count(), 2);
        assert!(scene.mesh("Cube").is_some());
        assert!(scene.mesh("Missing").is_none());
    }

    #[test]
    fn duplicate_membership_is_rejected() {
        let mut scene = Scene::new();
        scene.add_mesh(cube("Cube")).unwrap();
        assert_eq!(
            scene.add_mesh(cube("Cube")),
            Err(SceneError::Duplicate("Cube".to_string()))
        );
        // Names are unique across meshes and lights alike.
        assert!(scene
            .add_light(Light::ambient("Cube", Vec3::ONE, 1.0))
            .is_err());
    }

    #[test]
    fn hex_colors_decode_to_linear_components() {
        assert_eq!(color_from_hex(0xff0051), Vec3::new(1.0, 0.0, 81.0 / 255.0));
        assert_eq!(color_from_hex(0xffffff), Vec3::ONE);
        assert_eq!(color_from_hex(0x000000), Vec3::ZERO);
    }
}
