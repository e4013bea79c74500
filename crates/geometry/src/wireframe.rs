use crate::geometry::Topology;

/// Derives a line-list index buffer from solid triangle data.
///
/// Walks the index buffer one triangle window at a time (stride 1 for
/// strips, 3 for lists), skips windows with a repeated index (degenerate
/// strip joins, zero-area triangles) and emits each surviving triangle's
/// three edges as index pairs.
pub fn extract_wireframe(topology: Topology, indices: &[u16]) -> Vec<u16> {
    let stride = match topology {
        Topology::TriangleStrip => 1,
        Topology::TriangleList => 3,
    };

    let mut out = Vec::new();
    let mut i = 0;
    while i + 3 <= indices.len() {
        let (i0, i1, i2) = (indices[i], indices[i + 1], indices[i + 2]);
        i += stride;

        if i0 == i1 || i0 == i2 || i1 == i2 {
            continue;
        }

        out.extend_from_slice(&[i0, i1, i1, i2, i2, i0]);
    }

    out
}

/// Offsets of the quad-boundary indices within each 12-index block of a
/// wireframe built from a subdivided quad mesh (two triangles, six
/// edges). The omitted offsets {2,3,6,7} are the interior diagonal.
const QUAD_EDGE_OFFSETS: [usize; 8] = [0, 1, 4, 5, 8, 9, 10, 11];

/// Filters a wireframe line list whose source was a triangulated quad
/// mesh, dropping each quad's interior diagonal.
///
/// Structural: relies on the fixed 12-index-per-quad layout produced by
/// [`extract_wireframe`] over subdivided quads.
pub fn quadrify_wireframe(indices: &[u16]) -> Vec<u16> {
    let mut out = Vec::with_capacity(indices.len() / 12 * 8);
    for block in indices.chunks_exact(12) {
        for &offset in &QUAD_EDGE_OFFSETS {
            out.push(block[offset]);
        }
    }
    out
}
