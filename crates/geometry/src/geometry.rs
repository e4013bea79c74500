use std::fmt;

use foundation::math::{Mat4, Vec3};

/// How an index buffer encodes triangles.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Topology {
    /// Each index forms a triangle with the previous two; sub-strips are
    /// stitched with degenerate (repeated) indices.
    TriangleStrip,
    TriangleList,
}

#[derive(Debug)]
pub enum GeometryError {
    /// An index crossed the edge-split table bound; subdividing further
    /// would silently alias midpoints.
    IndexLimit { index: u32, limit: u32 },
    /// Vertex count left the u16 index range.
    VertexOverflow { vertices: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::IndexLimit { index, limit } => {
                write!(f, "edge split table cannot hold index {index} (limit {limit})")
            }
            GeometryError::VertexOverflow { vertices } => {
                write!(f, "vertex count {vertices} exceeds the 16-bit index range")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// CPU-side mesh data: positions plus a 16-bit index buffer.
///
/// Invariant: every index is a valid position index.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub topology: Topology,
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u16>,
}

impl Geometry {
    pub fn new(topology: Topology, vertices: Vec<Vec3>, indices: Vec<u16>) -> Self {
        Self {
            topology,
            vertices,
            indices,
        }
    }

    pub fn empty(topology: Topology) -> Self {
        Self::new(topology, Vec::new(), Vec::new())
    }

    /// Appends another geometry of the same topology, rebasing its
    /// indices by the running vertex count.
    pub fn append(&mut self, other: &Geometry) {
        debug_assert_eq!(self.topology, other.topology);
        let base = self.vertices.len() as u16;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices
            .extend(other.indices.iter().map(|&i| i + base));
    }

    /// Applies a matrix to every vertex in place.
    pub fn transform(&mut self, matrix: Mat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point(*v);
        }
    }

    /// Offsets every vertex in place.
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            *v = *v + offset;
        }
    }

    /// Uniformly scales every vertex about the origin.
    pub fn scale(&mut self, factor: f32) {
        for v in &mut self.vertices {
            *v = *v * factor;
        }
    }

    /// Non-degenerate triangle count encoded by the index buffer.
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::TriangleList => self.indices.len() / 3,
            Topology::TriangleStrip => {
                let mut count = 0;
                for w in self.indices.windows(3) {
                    if w[0] != w[1] && w[0] != w[2] && w[1] != w[2] {
                        count += 1;
                    }
                }
                count
            }
        }
    }

    /// Checks the index-in-range invariant.
    pub fn indices_in_range(&self) -> bool {
        let len = self.vertices.len();
        self.indices.iter().all(|&i| (i as usize) < len)
    }
}

#[cfg(test)]
mod tests {
    use super::{Geometry, Topology};
    use foundation::math::{Mat4, Vec3};

    fn tri(at: Vec3) -> Geometry {
        Geometry::new(
            Topology::TriangleList,
            vec![at, at + Vec3::new(1.0, 0.0, 0.0), at + Vec3::new(0.0, 1.0, 0.0)],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn append_rebases_indices() {
        let mut merged = tri(Vec3::ZERO);
        merged.append(&tri(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(merged.vertices.len(), 6);
        assert_eq!(merged.indices, vec![0, 1, 2, 3, 4, 5]);
        assert!(merged.indices_in_range());
    }

    #[test]
    fn transform_moves_vertices() {
        let mut g = tri(Vec3::ZERO);
        g.transform(Mat4::translation(Vec3::new(0.0, 0.0, 2.0)));
        assert_eq!(g.vertices[0], Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn strip_triangle_count_skips_degenerates() {
        // Two sub-strips joined by a double-tap: 1 triangle each.
        let g = Geometry::new(
            Topology::TriangleStrip,
            vec![Vec3::ZERO; 6],
            vec![0, 1, 2, 2, 3, 3, 4, 5],
        );
        assert_eq!(g.triangle_count(), 2);
    }
}
