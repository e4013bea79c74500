use foundation::math::{Mat4, Vec3};
use std::f32::consts::PI;

use crate::geometry::{Geometry, GeometryError, Topology};
use crate::subdivide::{project_to_sphere, subdivide};

/// An n x n vertex grid at y = 1, x/z in [-scale/2, scale/2], indexed as
/// one serpentine triangle strip. Rows are stitched with a double-tapped
/// first/last index so the join triangles are degenerate.
///
/// Requires `n >= 2`.
pub fn plane(scale: f32, n: usize) -> Geometry {
    debug_assert!(n >= 2);

    let mut vertices = Vec::with_capacity(n * n);
    let mid = scale / 2.0;
    let step = scale / (n as f32 - 1.0);
    for y in 0..n {
        for x in 0..n {
            vertices.push(Vec3::new(x as f32 * step - mid, 1.0, y as f32 * step - mid));
        }
    }

    let mut indices = Vec::with_capacity((n - 1) * (2 * n + 2));
    for y in 0..n - 1 {
        let mut index = (y * n) as u16;

        // Strip-join double-tap
        indices.push(index);

        for _ in 0..n {
            indices.push(index);
            indices.push(index + n as u16);
            index += 1;
        }

        // Strip-join double-tap
        indices.push(index - 1 + n as u16);
    }

    Geometry::new(Topology::TriangleStrip, vertices, indices)
}

/// Six per-face oriented planes merged into one strip, tiling a cube of
/// half-extent `scale`.
pub fn cube(scale: f32, n: usize) -> Geometry {
    let mut out = Geometry::empty(Topology::TriangleStrip);

    for face in 0..6 {
        let axis = face / 2;
        let angle = if face & 1 == 1 { PI / 2.0 } else { -PI / 2.0 };

        let rotation = match axis {
            0 => Mat4::rotation_z(angle),
            1 => Mat4::rotation_x(angle + PI / 2.0),
            _ => Mat4::rotation_x(angle),
        };

        // Unit plane: x/z in [-1, 1], y = 1. Rotating it points the
        // y = 1 offset along the face normal; the uniform scale then
        // sets the half-extent.
        let mut face_geom = plane(2.0, n);
        face_geom.transform(rotation);
        face_geom.scale(scale);

        out.append(&face_geom);
    }

    out
}

/// Regular octahedron: the dual of a cube, one vertex per cube face.
pub fn octahedron() -> Geometry {
    let vertices = vec![
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
    ];

    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2,
        0, 2, 3,
        0, 3, 4,
        0, 4, 1,
        5, 1, 2,
        5, 2, 3,
        5, 3, 4,
        5, 4, 1,
    ];

    Geometry::new(Topology::TriangleList, vertices, indices)
}

/// A single octahedron face: the one-triangle building block used before
/// subdivision.
pub fn octahedron_face() -> Geometry {
    let vertices = vec![
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, 0.0),
    ];
    Geometry::new(Topology::TriangleList, vertices, vec![0, 1, 2])
}

/// Regular icosahedron from golden-ratio permutations, normalized to the
/// unit sphere.
///
/// The index table is the canonical icosphere seed ordering (5 faces
/// around point 0, 5 adjacent, 5 around point 3, 5 adjacent) and must
/// stay exactly as written: subdivision face adjacency depends on it.
pub fn icosahedron() -> Geometry {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let raw = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ];
    let vertices = raw
        .iter()
        .map(|&p| Vec3::from(p).normalized())
        .collect();

    #[rustfmt::skip]
    let indices = vec![
        // 5 faces around point 0
        0, 11, 5,
        0, 5, 1,
        0, 1, 7,
        0, 7, 10,
        0, 10, 11,
        // 5 adjacent faces
        1, 5, 9,
        5, 11, 4,
        11, 10, 2,
        10, 7, 6,
        7, 1, 8,
        // 5 faces around point 3
        3, 9, 4,
        3, 4, 2,
        3, 2, 6,
        3, 6, 8,
        3, 8, 9,
        // 5 adjacent faces
        4, 9, 5,
        2, 4, 11,
        6, 2, 10,
        8, 6, 7,
        9, 8, 1,
    ];

    Geometry::new(Topology::TriangleList, vertices, indices)
}

/// Octahedron subdivided `subdivisions` times, projected to `radius`.
///
/// Deterministic: the same inputs produce the same vertex count and
/// ordering.
pub fn sphere(radius: f32, subdivisions: usize) -> Result<Geometry, GeometryError> {
    let mut geometry = octahedron();
    for _ in 0..subdivisions {
        geometry = subdivide(geometry, false)?;
    }
    project_to_sphere(&mut geometry, radius);
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::{cube, icosahedron, octahedron, octahedron_face, plane, sphere};

    #[test]
    fn plane_counts_match_grid() {
        for n in 2..8 {
            let g = plane(4.0, n);
            assert_eq!(g.vertices.len(), n * n);
            assert_eq!(g.indices.len(), (n - 1) * (2 * n + 2));
            assert!(g.indices_in_range());
        }
    }

    #[test]
    fn plane_sits_at_unit_height() {
        let g = plane(3.0, 4);
        for v in &g.vertices {
            assert_eq!(v.y, 1.0);
            assert!(v.x >= -1.5 && v.x <= 1.5);
            assert!(v.z >= -1.5 && v.z <= 1.5);
        }
    }

    #[test]
    fn cube_merges_six_planes() {
        let n = 3;
        let g = cube(2.0, n);
        assert_eq!(g.vertices.len(), 6 * n * n);
        assert!(g.indices_in_range());

        // Every vertex lies on the surface of the half-extent-2 cube.
        for v in &g.vertices {
            let m = v.x.abs().max(v.y.abs()).max(v.z.abs());
            assert!((m - 2.0).abs() < 1e-4, "{v:?}");
        }
    }

    #[test]
    fn octahedron_has_eight_faces() {
        let g = octahedron();
        assert_eq!(g.vertices.len(), 6);
        assert_eq!(g.triangle_count(), 8);
        assert!(g.indices_in_range());
    }

    #[test]
    fn octahedron_face_is_one_triangle() {
        let g = octahedron_face();
        assert_eq!(g.vertices.len(), 3);
        assert_eq!(g.indices, vec![0, 1, 2]);
    }

    #[test]
    fn icosahedron_is_canonical() {
        let g = icosahedron();
        assert_eq!(g.vertices.len(), 12);
        assert_eq!(g.triangle_count(), 20);
        // Seed table spot checks: first and last faces.
        assert_eq!(&g.indices[0..3], &[0, 11, 5]);
        assert_eq!(&g.indices[57..60], &[9, 8, 1]);
        for v in &g.vertices {
            assert!((v.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn sphere_triangle_count_and_radius() {
        for k in 0..4 {
            let g = sphere(2.5, k).unwrap();
            assert_eq!(g.triangle_count(), 8 * 4usize.pow(k as u32));
            for v in &g.vertices {
                assert!((v.length() - 2.5).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn sphere_is_deterministic() {
        let a = sphere(1.0, 3).unwrap();
        let b = sphere(1.0, 3).unwrap();
        assert_eq!(a.vertices.len(), b.vertices.len());
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.indices, b.indices);
    }
}
