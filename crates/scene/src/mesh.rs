use foundation::color::Color;
use foundation::math::{Mat4, Vec3};
use geometry::{Geometry, extract_wireframe, quadrify_wireframe};

use crate::shaders::ShaderId;

/// Closed set of mesh draw modes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawStyle {
    /// Fill pass only.
    Solid,
    /// Fill pass plus every triangle edge as lines.
    WireframeTris,
    /// Fill pass plus quad-boundary lines (interior diagonals dropped).
    WireframeQuads,
}

impl DrawStyle {
    pub fn has_wireframe(self) -> bool {
        matches!(self, DrawStyle::WireframeTris | DrawStyle::WireframeQuads)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CullFace {
    Front,
    Back,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    Increment,
    Decrement,
    Invert,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompareFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// Stencil op triple plus compare function and reference value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StencilState {
    pub fail: StencilOp,
    pub depth_fail: StencilOp,
    pub pass: StencilOp,
    pub func: CompareFunc,
    pub reference: u8,
}

/// Fixed-function state applied per draw pass.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RenderState {
    pub cull: Option<CullFace>,
    pub stencil: Option<StencilState>,
}

/// Per-mesh shader uniform override.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vector3(Vec3),
}

/// One renderable mesh: CPU buffers, derived wireframe index buffer,
/// shader handle and per-instance draw parameters.
///
/// Topology is immutable after construction; position, uniforms, colours
/// and fixed-function state stay mutable. The whole record is dropped
/// when the scene's mesh list is cleared on re-evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub style: DrawStyle,
    pub geometry: Geometry,
    pub wireframe_indices: Option<Vec<u16>>,
    pub shader: ShaderId,
    pub position: Vec3,
    pub fill_color: Color,
    pub outline_color: Color,
    pub state: RenderState,
    uniforms: Vec<(String, UniformValue)>,
}

impl Mesh {
    pub fn new(
        style: DrawStyle,
        geometry: Geometry,
        shader: ShaderId,
        fill_color: Color,
        outline_color: Color,
    ) -> Self {
        let wireframe_indices = if style.has_wireframe() {
            let mut wires = extract_wireframe(geometry.topology, &geometry.indices);
            if style == DrawStyle::WireframeQuads {
                wires = quadrify_wireframe(&wires);
            }
            Some(wires)
        } else {
            None
        };

        Self {
            style,
            geometry,
            wireframe_indices,
            shader,
            position: Vec3::ZERO,
            fill_color,
            outline_color,
            state: RenderState::default(),
            uniforms: Vec::new(),
        }
    }

    pub fn object_to_world(&self) -> Mat4 {
        Mat4::translation(self.position)
    }

    /// Sets a named override; replaces any previous value under the same
    /// key (keys are unique).
    pub fn set_uniform(&mut self, name: impl Into<String>, value: UniformValue) {
        let name = name.into();
        if let Some(entry) = self.uniforms.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = value;
        } else {
            self.uniforms.push((name, value));
        }
    }

    pub fn uniforms(&self) -> &[(String, UniformValue)] {
        &self.uniforms
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawStyle, Mesh, UniformValue};
    use crate::shaders::ShaderId;
    use foundation::color::{BLACK, WHITE};
    use geometry::shapes::octahedron;

    fn mesh(style: DrawStyle) -> Mesh {
        Mesh::new(style, octahedron(), ShaderId::DEFAULT, WHITE, BLACK)
    }

    #[test]
    fn solid_mesh_has_no_wireframe_buffer() {
        assert!(mesh(DrawStyle::Solid).wireframe_indices.is_none());
    }

    #[test]
    fn wireframe_mesh_derives_line_indices() {
        let m = mesh(DrawStyle::WireframeTris);
        let wires = m.wireframe_indices.as_ref().unwrap();
        assert_eq!(wires.len(), 6 * 8);
    }

    #[test]
    fn uniform_keys_stay_unique() {
        let mut m = mesh(DrawStyle::Solid);
        m.set_uniform("Time", UniformValue::Float(1.0));
        m.set_uniform("Time", UniformValue::Float(2.0));
        assert_eq!(m.uniforms().len(), 1);
        assert_eq!(m.uniforms()[0].1, UniformValue::Float(2.0));
    }
}
