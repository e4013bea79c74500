use std::fmt;

use foundation::color::{BLACK, Color};
use foundation::math::Vec3;
use geometry::basis::Basis;
use geometry::{Geometry, GeometryError};

use crate::camera::{CameraConfig, CameraRig};
use crate::floating_text::FloatingText;
use crate::mesh::{DrawStyle, Mesh};
use crate::shaders::ShaderCatalog;

// Leader-line proportions for measure annotations.
const MEASURE_SHAFT_RADIUS: f32 = 0.01;
const MEASURE_CONE_RADIUS: f32 = 0.035;
const MEASURE_DASH_LENGTH: f32 = 0.08;

#[derive(Debug)]
pub enum SceneError {
    Geometry(GeometryError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Geometry(err) => write!(f, "geometry error: {err}"),
        }
    }
}

impl std::error::Error for SceneError {}

impl From<GeometryError> for SceneError {
    fn from(err: GeometryError) -> Self {
        SceneError::Geometry(err)
    }
}

/// Index into the scene's mesh list, valid for the current generation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MeshId(pub usize);

/// The live scene: mesh and label lists (insertion order is paint
/// order), the camera rig and the shader catalog.
///
/// The builder methods below are the only mutators of the mesh/label
/// lists; user code reaches them through the script evaluator.
#[derive(Debug)]
pub struct Scene {
    pub camera: CameraRig,
    shaders: ShaderCatalog,
    meshes: Vec<Mesh>,
    labels: Vec<FloatingText>,
    generation: u64,
}

impl Scene {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            camera: CameraRig::new(aspect_ratio, CameraConfig::default()),
            shaders: ShaderCatalog::default(),
            meshes: Vec::new(),
            labels: Vec::new(),
            generation: 0,
        }
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id.0)
    }

    pub fn labels(&self) -> &[FloatingText] {
        &self.labels
    }

    pub fn shaders(&self) -> &ShaderCatalog {
        &self.shaders
    }

    /// Bumped after every committed edit session; backends use it to
    /// invalidate cached GPU resources.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Runs one evaluation cycle against an emptied mesh/label list.
    ///
    /// Commit-on-success: a failed evaluation restores the previous
    /// lists unchanged, so a broken edit never corrupts the scene that
    /// is currently rendering. The shader catalog deliberately survives
    /// failures, keeping previously compiled programs alive.
    pub fn edit<T, E>(&mut self, f: impl FnOnce(&mut Scene) -> Result<T, E>) -> Result<T, E> {
        let old_meshes = std::mem::take(&mut self.meshes);
        let old_labels = std::mem::take(&mut self.labels);

        match f(self) {
            Ok(value) => {
                self.generation += 1;
                Ok(value)
            }
            Err(err) => {
                self.meshes = old_meshes;
                self.labels = old_labels;
                Err(err)
            }
        }
    }

    /// General mesh builder: registers any custom shader stages (falling
    /// back to the scene default program) and appends a mesh record.
    pub fn add_mesh(
        &mut self,
        style: DrawStyle,
        geometry: Geometry,
        vertex_shader: Option<&str>,
        fragment_shader: Option<&str>,
        fill_color: Color,
        outline_color: Color,
    ) -> MeshId {
        let shader = self.shaders.intern(vertex_shader, fragment_shader);
        self.push_mesh(Mesh::new(style, geometry, shader, fill_color, outline_color))
    }

    /// Solid sphere of the given radius: octahedron subdivided
    /// `subdivisions` times, projected to the radius.
    pub fn add_sphere_mesh(
        &mut self,
        center: Vec3,
        radius: f32,
        subdivisions: usize,
        color: Color,
    ) -> Result<MeshId, SceneError> {
        let geometry = geometry::shapes::sphere(radius, subdivisions)?;
        let id = self.add_mesh(DrawStyle::Solid, geometry, None, None, color, BLACK);
        if let Some(mesh) = self.mesh_mut(id) {
            mesh.position = center;
        }
        Ok(id)
    }

    /// Thick 3-D line between two points, with optional cone cap and
    /// dashing.
    pub fn add_line_mesh(
        &mut self,
        a: Vec3,
        b: Vec3,
        shaft_radius: f32,
        cone_radius: Option<f32>,
        dash_length: Option<f32>,
        color: Color,
    ) -> MeshId {
        let geometry = geometry::primitives::line(a, b, shaft_radius, cone_radius, dash_length);
        self.add_mesh(DrawStyle::Solid, geometry, None, None, color, BLACK)
    }

    /// Flat ring centred at `center`, lying in the XZ plane.
    pub fn add_circle_line_mesh(
        &mut self,
        center: Vec3,
        divisions: usize,
        radius: f32,
        thickness: f32,
        color: Color,
    ) -> MeshId {
        let geometry = geometry::primitives::circle_line(divisions, radius, thickness);
        let id = self.add_mesh(DrawStyle::Solid, geometry, None, None, color, BLACK);
        if let Some(mesh) = self.mesh_mut(id) {
            mesh.position = center;
        }
        id
    }

    pub fn add_floating_text(&mut self, text: &str, position: Vec3, facing: Option<Vec3>) {
        self.labels.push(FloatingText::new(text, position, facing));
    }

    /// Annotated measurement between two world points: dashed
    /// cone-capped leader lines offset perpendicular to the measured
    /// span, plus one centred floating label.
    pub fn add_measure(
        &mut self,
        a: Vec3,
        b: Vec3,
        offset: f32,
        label: &str,
        label_offset: Vec3,
        color: Color,
    ) {
        let basis = Basis::from_points(a, b);
        let perp = basis.y * offset;
        let a_off = a + perp;
        let b_off = b + perp;
        let mid = Vec3::lerp(a_off, b_off, 0.5);

        // Extension lines out from the measured points.
        self.add_line_mesh(a, a_off, MEASURE_SHAFT_RADIUS, None, Some(MEASURE_DASH_LENGTH), color);
        self.add_line_mesh(b, b_off, MEASURE_SHAFT_RADIUS, None, Some(MEASURE_DASH_LENGTH), color);

        // Leader lines from the centre out, arrowheads at both ends.
        self.add_line_mesh(
            mid,
            a_off,
            MEASURE_SHAFT_RADIUS,
            Some(MEASURE_CONE_RADIUS),
            Some(MEASURE_DASH_LENGTH),
            color,
        );
        self.add_line_mesh(
            mid,
            b_off,
            MEASURE_SHAFT_RADIUS,
            Some(MEASURE_CONE_RADIUS),
            Some(MEASURE_DASH_LENGTH),
            color,
        );

        self.add_floating_text(label, mid + label_offset, None);
    }

    fn push_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }
}
