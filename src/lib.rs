//! Rotating-cubes scene demo, rewritten in Rust.
//!
//! The crate bootstraps a fixed scene (a solid lit cube, a wireframe cube,
//! an ambient light and a point light), then drives a per-frame tick that
//! spins the cubes and a resize handler that keeps the camera aspect in
//! sync with the viewport.  The frame loop and windowing live in the
//! binary; everything here is plain state that can be ticked synchronously
//! from tests.

pub mod bootstrap;
pub mod camera;
pub mod geometry;
pub mod render;
pub mod scene;

pub use bootstrap::{bootstrap, SceneContext};
pub use camera::PerspectiveCamera;
pub use geometry::{BoxGeometry, Vertex};
pub use render::{CameraParams, LightingParams, Renderer};
pub use scene::{Light, LightKind, Material, Mesh, Scene, SceneError, Shading};
