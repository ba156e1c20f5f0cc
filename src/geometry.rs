use bytemuck::{Pod, Zeroable};

/// Interleaved vertex layout shared by every pipeline: position + normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Axis-aligned box shape centered on the origin.
///
/// Dimensions are kept exactly as given; the demo scene builds its wireframe
/// cube as `(3, 3, -3)` and the negative depth is preserved rather than
/// normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

// One quad per face, 4 vertices each. Faces in the order: front (+z),
// back (-z), left (-x), right (+x), bottom (-y), top (+y).
const TRIANGLE_INDICES: &[u32] = &[
    0, 1, 2, 0, 2, 3, // front
    4, 6, 5, 4, 7, 6, // back
    8, 9, 10, 8, 10, 11, // left
    12, 14, 13, 12, 15, 14, // right
    16, 18, 17, 16, 19, 18, // bottom
    20, 21, 22, 20, 22, 23, // top
];

impl BoxGeometry {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// 24 position+normal vertices, 4 per face.
    pub fn vertices(&self) -> Vec<Vertex> {
        let x = self.width / 2.0;
        let y = self.height / 2.0;
        let z = self.depth / 2.0;

        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            (
                [0.0, 0.0, 1.0],
                [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]],
            ),
            (
                [0.0, 0.0, -1.0],
                [[-x, -y, -z], [x, -y, -z], [x, y, -z], [-x, y, -z]],
            ),
            (
                [-1.0, 0.0, 0.0],
                [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]],
            ),
            (
                [1.0, 0.0, 0.0],
                [[x, -y, -z], [x, -y, z], [x, y, z], [x, y, -z]],
            ),
            (
                [0.0, -1.0, 0.0],
                [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]],
            ),
            (
                [0.0, 1.0, 0.0],
                [[-x, y, -z], [x, y, -z], [x, y, z], [-x, y, z]],
            ),
        ];

        faces
            .iter()
            .flat_map(|(normal, corners)| {
                corners.iter().map(|position| Vertex {
                    position: *position,
                    normal: *normal,
                })
            })
            .collect()
    }

    /// Triangle-list indices into [`Self::vertices`].
    pub fn triangle_indices(&self) -> Vec<u32> {
        TRIANGLE_INDICES.to_vec()
    }

    /// Line-list indices outlining each face, for wireframe drawing.
    ///
    /// Shared edges appear twice; drawing them twice is harmless and keeps
    /// the table trivially derivable from the face layout.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut edges = Vec::with_capacity(6 * 8);
        for face in 0..6u32 {
            let base = face * 4;
            for corner in 0..4 {
                edges.push(base + corner);
                edges.push(base + (corner + 1) % 4);
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_box_has_one_quad_per_face() {
        let geometry = BoxGeometry::new(1.0, 1.0, 1.0);
        let vertices = geometry.vertices();
        assert_eq!(vertices.len(), 24);
        assert_eq!(geometry.triangle_indices().len(), 36);
        for index in geometry.triangle_indices() {
            assert!((index as usize) < vertices.len());
        }
    }

    #[test]
    fn dimensions_scale_the_half_extents() {
        let geometry = BoxGeometry::new(3.0, 3.0, -3.0);
        let vertices = geometry.vertices();
        let max_x = vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        let min_z = vertices
            .iter()
            .map(|v| v.position[2])
            .fold(f32::MAX, f32::min);
        assert_eq!(max_x, 1.5);
        // Negative depth flips the z extents but keeps their magnitude.
        assert_eq!(min_z, -1.5);
    }

    #[test]
    fn edge_list_outlines_every_face() {
        let geometry = BoxGeometry::new(1.0, 1.0, 1.0);
        let edges = geometry.edge_indices();
        assert_eq!(edges.len(), 48);
        for index in edges {
            assert!(index < 24);
        }
    }
}
