use std::collections::HashMap;

use foundation::math::Vec3;

use crate::geometry::{Geometry, GeometryError, Topology};

/// Largest vertex index the packed edge key can hold. Subdividing a mesh
/// whose indices reach this bound is a configuration error, never a
/// silent wraparound.
pub const EDGE_INDEX_LIMIT: u32 = 32_768;

/// Memoizes edge midpoints by unordered endpoint pair so a shared edge is
/// split exactly once from both sides.
struct EdgeSplits {
    map: HashMap<u32, u16>,
}

impl EdgeSplits {
    fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    fn key(i0: u16, i1: u16) -> Result<u32, GeometryError> {
        // Lowest index first: the same key for both edge directions.
        let (lo, hi) = if i1 < i0 { (i1, i0) } else { (i0, i1) };
        let hi = hi as u32;
        if hi >= EDGE_INDEX_LIMIT {
            return Err(GeometryError::IndexLimit {
                index: hi,
                limit: EDGE_INDEX_LIMIT,
            });
        }
        Ok(lo as u32 * EDGE_INDEX_LIMIT + hi)
    }

    fn split(
        &mut self,
        vertices: &mut Vec<Vec3>,
        i0: u16,
        i1: u16,
        spherical: bool,
    ) -> Result<u16, GeometryError> {
        let key = Self::key(i0, i1)?;
        if let Some(&mid) = self.map.get(&key) {
            return Ok(mid);
        }

        let p0 = vertices[i0 as usize];
        let p1 = vertices[i1 as usize];
        let midpoint = if spherical {
            Vec3::slerp(p0, p1, 0.5)
        } else {
            Vec3::lerp(p0, p1, 0.5)
        };

        if vertices.len() >= u16::MAX as usize {
            return Err(GeometryError::VertexOverflow {
                vertices: vertices.len() + 1,
            });
        }
        vertices.push(midpoint);
        let mid = (vertices.len() - 1) as u16;
        self.map.insert(key, mid);
        Ok(mid)
    }
}

/// Splits every triangle of a triangle list into 4 by edge midpoints.
///
/// Shared edges between adjacent triangles reference the same new vertex,
/// keeping the result watertight. With `spherical` set, midpoints follow
/// the great-circle arc between the endpoint directions instead of the
/// chord. Strips pass through unchanged.
pub fn subdivide(geometry: Geometry, spherical: bool) -> Result<Geometry, GeometryError> {
    if geometry.topology != Topology::TriangleList {
        return Ok(geometry);
    }

    let Geometry {
        topology,
        mut vertices,
        indices,
    } = geometry;

    let mut splits = EdgeSplits::new();
    let mut out_indices = Vec::with_capacity(indices.len() * 4);

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0], tri[1], tri[2]);

        let i01 = splits.split(&mut vertices, i0, i1, spherical)?;
        let i12 = splits.split(&mut vertices, i1, i2, spherical)?;
        let i20 = splits.split(&mut vertices, i2, i0, spherical)?;

        // Corner / edge / edge / edge+center pattern.
        out_indices.extend_from_slice(&[
            i0, i01, i20, //
            i01, i1, i12, //
            i20, i01, i12, //
            i20, i12, i2,
        ]);
    }

    Ok(Geometry::new(topology, vertices, out_indices))
}

/// Normalizes and rescales every vertex in place. Only meaningful on
/// geometry whose vertices already lie roughly around the origin.
pub fn project_to_sphere(geometry: &mut Geometry, radius: f32) {
    for v in &mut geometry.vertices {
        *v = v.normalized() * radius;
    }
}
