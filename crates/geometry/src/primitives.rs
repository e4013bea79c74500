use foundation::math::Vec3;
use std::f32::consts::TAU;

use crate::basis::Basis;
use crate::geometry::{Geometry, Topology};

/// Cross-section sides for line shafts and cone caps. Diagram primitives
/// are deliberately low-poly; there is no LOD control beyond explicit
/// division counts.
pub const LINE_SECTION_DIVISIONS: usize = 8;

/// Cone cap length as a multiple of its radius.
const CONE_LENGTH_FACTOR: f32 = 3.0;

fn ring(center: Vec3, basis: &Basis, radius: f32, divisions: usize) -> Vec<Vec3> {
    (0..divisions)
        .map(|k| {
            let angle = TAU * k as f32 / divisions as f32;
            center + basis.x * (angle.cos() * radius) + basis.y * (angle.sin() * radius)
        })
        .collect()
}

/// A capped cylinder between two points.
pub fn cylinder(a: Vec3, b: Vec3, radius: f32, divisions: usize) -> Geometry {
    let basis = Basis::from_points(a, b);
    let n = divisions as u16;

    let mut vertices = ring(a, &basis, radius, divisions);
    vertices.extend(ring(b, &basis, radius, divisions));
    vertices.push(a);
    vertices.push(b);
    let center_a = 2 * n;
    let center_b = 2 * n + 1;

    let mut indices = Vec::with_capacity(divisions * 12);
    for k in 0..n {
        let k1 = (k + 1) % n;
        let (a0, a1) = (k, k1);
        let (b0, b1) = (n + k, n + k1);

        // Side quad
        indices.extend_from_slice(&[a0, b0, a1, a1, b0, b1]);
        // End caps
        indices.extend_from_slice(&[center_a, a1, a0]);
        indices.extend_from_slice(&[center_b, b0, b1]);
    }

    Geometry::new(Topology::TriangleList, vertices, indices)
}

/// A cone from a base disc to a tip point.
pub fn cone(base: Vec3, tip: Vec3, radius: f32, divisions: usize) -> Geometry {
    let basis = Basis::from_points(base, tip);
    let n = divisions as u16;

    let mut vertices = ring(base, &basis, radius, divisions);
    vertices.push(tip);
    vertices.push(base);
    let tip_index = n;
    let center = n + 1;

    let mut indices = Vec::with_capacity(divisions * 6);
    for k in 0..n {
        let k1 = (k + 1) % n;
        indices.extend_from_slice(&[tip_index, k, k1]);
        indices.extend_from_slice(&[center, k1, k]);
    }

    Geometry::new(Topology::TriangleList, vertices, indices)
}

/// A filled disc perpendicular to `normal`.
pub fn circle_fan(center: Vec3, normal: Vec3, radius: f32, divisions: usize) -> Geometry {
    let basis = Basis::from_direction(normal);
    let n = divisions as u16;

    let mut vertices = vec![center];
    vertices.extend(ring(center, &basis, radius, divisions));

    let mut indices = Vec::with_capacity(divisions * 3);
    for k in 0..n {
        let k1 = (k + 1) % n;
        indices.extend_from_slice(&[0, 1 + k, 1 + k1]);
    }

    Geometry::new(Topology::TriangleList, vertices, indices)
}

/// A flat ring in the XZ plane at the origin: outer radius `radius`,
/// inner radius `radius - thickness`.
pub fn circle_line(divisions: usize, radius: f32, thickness: f32) -> Geometry {
    let basis = Basis::from_direction(Vec3::new(0.0, 1.0, 0.0));
    let inner_radius = radius - thickness;
    let n = divisions as u16;

    let mut vertices = ring(Vec3::ZERO, &basis, inner_radius, divisions);
    vertices.extend(ring(Vec3::ZERO, &basis, radius, divisions));

    let mut indices = Vec::with_capacity(divisions * 6);
    for k in 0..n {
        let k1 = (k + 1) % n;
        let (i0, i1) = (k, k1);
        let (o0, o1) = (n + k, n + k1);
        indices.extend_from_slice(&[i0, o0, i1, i1, o0, o1]);
    }

    Geometry::new(Topology::TriangleList, vertices, indices)
}

/// A flat quad of the given width spanning two points.
pub fn line_segment_quad(a: Vec3, b: Vec3, width: f32) -> Geometry {
    let basis = Basis::from_points(a, b);
    let half = basis.x * (width / 2.0);

    let vertices = vec![a - half, a + half, b - half, b + half];
    let indices = vec![0, 1, 2, 2, 1, 3];

    Geometry::new(Topology::TriangleList, vertices, indices)
}

/// A thick 3-D line between two points: a cylindrical shaft, an optional
/// cone cap at `b`, and optional dashing (alternate on/off segments of
/// `dash_length` along the line).
pub fn line(
    a: Vec3,
    b: Vec3,
    shaft_radius: f32,
    cone_radius: Option<f32>,
    dash_length: Option<f32>,
) -> Geometry {
    let direction = b - a;
    let length = direction.length();
    let dir = direction.normalized();

    // Shorten the shaft to leave room for the cap.
    let cone_length = cone_radius
        .map(|r| (r * CONE_LENGTH_FACTOR).min(length))
        .unwrap_or(0.0);
    let shaft_end = b - dir * cone_length;
    let shaft_length = length - cone_length;

    let mut out = Geometry::empty(Topology::TriangleList);

    match dash_length {
        Some(dash) if dash > 0.0 => {
            let mut start = 0.0;
            while start < shaft_length {
                let end = (start + dash).min(shaft_length);
                out.append(&cylinder(
                    a + dir * start,
                    a + dir * end,
                    shaft_radius,
                    LINE_SECTION_DIVISIONS,
                ));
                start += dash * 2.0;
            }
        }
        _ => {
            out.append(&cylinder(a, shaft_end, shaft_radius, LINE_SECTION_DIVISIONS));
        }
    }

    if let Some(radius) = cone_radius {
        out.append(&cone(shaft_end, b, radius, LINE_SECTION_DIVISIONS));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{
        LINE_SECTION_DIVISIONS, circle_fan, circle_line, cone, cylinder, line, line_segment_quad,
    };
    use foundation::math::Vec3;

    const A: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    const B: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 10.0,
    };

    #[test]
    fn cylinder_counts() {
        let g = cylinder(A, B, 0.5, 8);
        assert_eq!(g.vertices.len(), 2 * 8 + 2);
        // 2 side triangles + 2 cap triangles per division.
        assert_eq!(g.triangle_count(), 4 * 8);
        assert!(g.indices_in_range());
    }

    #[test]
    fn cylinder_ring_radius() {
        let g = cylinder(A, B, 0.5, 8);
        for v in &g.vertices[0..8] {
            let radial = Vec3::new(v.x, v.y, 0.0);
            assert!((radial.length() - 0.5).abs() < 1e-5);
            assert!(v.z.abs() < 1e-5);
        }
    }

    #[test]
    fn cone_counts() {
        let g = cone(A, B, 1.0, 8);
        assert_eq!(g.vertices.len(), 8 + 2);
        assert_eq!(g.triangle_count(), 2 * 8);
        assert!(g.indices_in_range());
    }

    #[test]
    fn circle_fan_counts() {
        let g = circle_fan(A, Vec3::new(0.0, 1.0, 0.0), 2.0, 16);
        assert_eq!(g.vertices.len(), 17);
        assert_eq!(g.triangle_count(), 16);
    }

    #[test]
    fn circle_line_is_flat_annulus() {
        let g = circle_line(16, 2.0, 0.25);
        assert_eq!(g.vertices.len(), 32);
        assert_eq!(g.triangle_count(), 32);
        for v in &g.vertices {
            assert!(v.y.abs() < 1e-6);
            let r = Vec3::new(v.x, 0.0, v.z).length();
            assert!(r > 1.74 && r < 2.01, "radius {r}");
        }
    }

    #[test]
    fn quad_spans_endpoints() {
        let g = line_segment_quad(A, B, 0.2);
        assert_eq!(g.vertices.len(), 4);
        assert_eq!(g.triangle_count(), 2);
    }

    #[test]
    fn plain_line_is_one_cylinder() {
        let g = line(A, B, 0.1, None, None);
        assert_eq!(g.triangle_count(), 4 * LINE_SECTION_DIVISIONS);
    }

    #[test]
    fn capped_line_adds_a_cone() {
        let g = line(A, B, 0.1, Some(0.3), None);
        assert_eq!(
            g.triangle_count(),
            4 * LINE_SECTION_DIVISIONS + 2 * LINE_SECTION_DIVISIONS
        );
        // The cone tip reaches b.
        assert!(g.vertices.iter().any(|v| (*v - B).length() < 1e-5));
    }

    #[test]
    fn dashed_line_alternates_segments() {
        // Length 10, dash 1: shaft segments start at 0,2,4,6,8.
        let g = line(A, B, 0.1, None, Some(1.0));
        assert_eq!(g.triangle_count(), 5 * 4 * LINE_SECTION_DIVISIONS);
        assert!(g.indices_in_range());
    }
}
