use std::collections::HashMap;

use foundation::color::ColorTable;
use foundation::math::Vec3;
use geometry::{Geometry, subdivide};
use scene::{DrawStyle, Scene};

use crate::error::EvalError;
use crate::parser::{Expr, Program, Stmt};

/// A resolved script value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f32),
    Str(String),
    Vector(Vec3),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Vector(_) => "vector",
        }
    }
}

/// The explicit binding table user code resolves identifiers through:
/// colour names, named source buffers and `let` bindings. There is no
/// ambient scope beyond this table.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: HashMap<String, Value>,
}

impl Bindings {
    /// Seeds the table with every registered colour name.
    pub fn with_colors(colors: &ColorTable) -> Self {
        let mut bindings = Self::default();
        for name in colors.names() {
            if let Some(color) = colors.get(name) {
                bindings.set(name, Value::Vector(Vec3::from(color)));
            }
        }
        bindings
    }

    /// Injects a named source buffer as a string binding.
    pub fn set_buffer(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.set(name, Value::Str(text.into()));
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }
}

/// Runs a parsed program against the scene. Statements execute in order;
/// the first error aborts evaluation (the caller's edit session rolls
/// the scene back).
pub fn evaluate(
    program: &Program,
    scene: &mut Scene,
    bindings: &mut Bindings,
) -> Result<(), EvalError> {
    for stmt in &program.statements {
        match stmt {
            Stmt::Let {
                name,
                value,
                line,
                col,
            } => {
                let value = resolve(value, bindings, *line, *col)?;
                bindings.set(name.clone(), value);
            }
            Stmt::Call {
                method,
                args,
                line,
                col,
            } => {
                let values = args
                    .iter()
                    .map(|arg| resolve(arg, bindings, *line, *col))
                    .collect::<Result<Vec<_>, _>>()?;
                let call = Call {
                    method,
                    values,
                    line: *line,
                    col: *col,
                };
                dispatch(scene, &call)?;
            }
        }
    }
    Ok(())
}

fn resolve(
    expr: &Expr,
    bindings: &Bindings,
    line: usize,
    col: usize,
) -> Result<Value, EvalError> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Ident(name) => bindings
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::new(format!("unknown identifier `{name}`"), line, col)),
        Expr::Vector(parts) => {
            let mut out = [0.0f32; 3];
            for (slot, part) in out.iter_mut().zip(parts) {
                match resolve(part, bindings, line, col)? {
                    Value::Number(n) => *slot = n,
                    other => {
                        return Err(EvalError::new(
                            format!("vector component must be a number, got {}", other.kind()),
                            line,
                            col,
                        ));
                    }
                }
            }
            Ok(Value::Vector(Vec3::from(out)))
        }
    }
}

struct Call<'a> {
    method: &'a str,
    values: Vec<Value>,
    line: usize,
    col: usize,
}

impl Call<'_> {
    fn err(&self, msg: impl Into<String>) -> EvalError {
        EvalError::new(msg.into(), self.line, self.col)
    }

    fn arity(&self, allowed: &[usize]) -> Result<(), EvalError> {
        if allowed.contains(&self.values.len()) {
            Ok(())
        } else {
            Err(self.err(format!(
                "{} takes {:?} arguments, got {}",
                self.method,
                allowed,
                self.values.len()
            )))
        }
    }

    fn number(&self, index: usize) -> Result<f32, EvalError> {
        match &self.values[index] {
            Value::Number(n) => Ok(*n),
            other => Err(self.err(format!(
                "{} argument {} must be a number, got {}",
                self.method,
                index + 1,
                other.kind()
            ))),
        }
    }

    fn count(&self, index: usize) -> Result<usize, EvalError> {
        let n = self.number(index)?;
        if n < 0.0 {
            return Err(self.err(format!(
                "{} argument {} must be non-negative",
                self.method,
                index + 1
            )));
        }
        Ok(n as usize)
    }

    fn vector(&self, index: usize) -> Result<Vec3, EvalError> {
        match &self.values[index] {
            Value::Vector(v) => Ok(*v),
            other => Err(self.err(format!(
                "{} argument {} must be a vector, got {}",
                self.method,
                index + 1,
                other.kind()
            ))),
        }
    }

    fn string(&self, index: usize) -> Result<&str, EvalError> {
        match &self.values[index] {
            Value::Str(s) => Ok(s),
            other => Err(self.err(format!(
                "{} argument {} must be a string, got {}",
                self.method,
                index + 1,
                other.kind()
            ))),
        }
    }

    fn color(&self, index: usize) -> Result<[f32; 3], EvalError> {
        Ok(self.vector(index)?.to_array())
    }

    /// Positive number or absent-by-zero optional argument.
    fn optional(&self, index: usize) -> Result<Option<f32>, EvalError> {
        let n = self.number(index)?;
        Ok(if n > 0.0 { Some(n) } else { None })
    }
}

fn dispatch(scene: &mut Scene, call: &Call<'_>) -> Result<(), EvalError> {
    match call.method {
        "AddMesh" => {
            call.arity(&[6, 8])?;
            let geometry = build_shape(call)?;
            let style = parse_style(call, call.string(3)?)?;
            let fill = call.color(4)?;
            let outline = call.color(5)?;
            let (vertex, fragment) = if call.values.len() == 8 {
                (Some(call.string(6)?), Some(call.string(7)?))
            } else {
                (None, None)
            };
            scene.add_mesh(style, geometry, vertex, fragment, fill, outline);
        }
        "AddSphereMesh" => {
            call.arity(&[4])?;
            let center = call.vector(0)?;
            let radius = call.number(1)?;
            let subdivisions = call.count(2)?;
            let color = call.color(3)?;
            scene
                .add_sphere_mesh(center, radius, subdivisions, color)
                .map_err(|err| call.err(err.to_string()))?;
        }
        "AddLineMesh" => {
            call.arity(&[6])?;
            let a = call.vector(0)?;
            let b = call.vector(1)?;
            let shaft = call.number(2)?;
            let cone = call.optional(3)?;
            let dash = call.optional(4)?;
            let color = call.color(5)?;
            scene.add_line_mesh(a, b, shaft, cone, dash, color);
        }
        "AddCircleLineMesh" => {
            call.arity(&[5])?;
            let center = call.vector(0)?;
            let divisions = call.count(1)?;
            let radius = call.number(2)?;
            let thickness = call.number(3)?;
            let color = call.color(4)?;
            scene.add_circle_line_mesh(center, divisions, radius, thickness, color);
        }
        "AddFloatingText" => {
            call.arity(&[2, 3])?;
            let text = call.string(0)?.to_string();
            let position = call.vector(1)?;
            let facing = if call.values.len() == 3 {
                Some(call.vector(2)?)
            } else {
                None
            };
            scene.add_floating_text(&text, position, facing);
        }
        "AddMeasure" => {
            call.arity(&[6])?;
            let a = call.vector(0)?;
            let b = call.vector(1)?;
            let offset = call.number(2)?;
            let label = call.string(3)?.to_string();
            let label_offset = call.vector(4)?;
            let color = call.color(5)?;
            scene.add_measure(a, b, offset, &label, label_offset, color);
        }
        other => return Err(call.err(format!("unknown scene method `{other}`"))),
    }
    Ok(())
}

/// Shape argument layout shared by `AddMesh`: name, scale, detail.
fn build_shape(call: &Call<'_>) -> Result<Geometry, EvalError> {
    let name = call.string(0)?;
    let scale = call.number(1)?;
    let detail = call.count(2)?;

    let geometry = match name {
        "plane" => geometry::shapes::plane(scale, grid_size(name, detail, call)?),
        "cube" => geometry::shapes::cube(scale, grid_size(name, detail, call)?),
        "octahedron" => subdivide_times(geometry::shapes::octahedron(), scale, detail, call)?,
        "icosahedron" => subdivide_times(geometry::shapes::icosahedron(), scale, detail, call)?,
        "sphere" => geometry::shapes::sphere(scale, detail)
            .map_err(|err| call.err(err.to_string()))?,
        other => {
            return Err(call.err(format!(
                "unknown shape `{other}` (plane, cube, octahedron, icosahedron, sphere)"
            )));
        }
    };
    Ok(geometry)
}

/// Grid shapes need at least two vertices per side.
fn grid_size(name: &str, detail: usize, call: &Call<'_>) -> Result<usize, EvalError> {
    if detail < 2 {
        return Err(call.err(format!(
            "{name} detail must be at least 2, got {detail}"
        )));
    }
    Ok(detail)
}

fn subdivide_times(
    base: Geometry,
    scale: f32,
    times: usize,
    call: &Call<'_>,
) -> Result<Geometry, EvalError> {
    let mut geometry = base;
    for _ in 0..times {
        geometry = subdivide(geometry, false).map_err(|err| call.err(err.to_string()))?;
    }
    geometry.scale(scale);
    Ok(geometry)
}

fn parse_style(call: &Call<'_>, name: &str) -> Result<DrawStyle, EvalError> {
    match name {
        "solid" => Ok(DrawStyle::Solid),
        "wireframe" => Ok(DrawStyle::WireframeTris),
        "quads" => Ok(DrawStyle::WireframeQuads),
        other => Err(call.err(format!(
            "unknown draw style `{other}` (solid, wireframe, quads)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{Bindings, Value, evaluate};
    use crate::parser::parse_str;
    use foundation::color::ColorTable;
    use scene::Scene;

    fn run(src: &str, scene: &mut Scene) -> Result<(), super::EvalError> {
        let program = parse_str(src).expect("parse");
        let mut bindings = Bindings::with_colors(&ColorTable::default());
        evaluate(&program, scene, &mut bindings)
    }

    #[test]
    fn sphere_call_builds_a_mesh() {
        let mut scene = Scene::new(1.0);
        run("scene.AddSphereMesh([0, 0, 0], 1, 2, WHITE);", &mut scene).expect("eval");
        assert_eq!(scene.meshes().len(), 1);
        assert_eq!(scene.meshes()[0].geometry.triangle_count(), 128);
    }

    #[test]
    fn let_bindings_resolve_in_later_calls() {
        let mut scene = Scene::new(1.0);
        run(
            "let r = 0.5;\nlet c = [1, 0, 0];\nscene.AddSphereMesh([0, 0, 0], r, 1, c);",
            &mut scene,
        )
        .expect("eval");
        assert_eq!(scene.meshes()[0].fill_color, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn unknown_identifier_reports_position() {
        let mut scene = Scene::new(1.0);
        let err = run("scene.AddSphereMesh([0, 0, 0], 1, 1, MAUVE);", &mut scene).unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("MAUVE"));
    }

    #[test]
    fn arity_mismatch_is_an_error() {
        let mut scene = Scene::new(1.0);
        let err = run("scene.AddSphereMesh([0, 0, 0], 1);", &mut scene).unwrap_err();
        assert!(err.message.contains("arguments"));
    }

    #[test]
    fn grid_shapes_reject_degenerate_detail() {
        let mut scene = Scene::new(1.0);
        let err = run(
            "scene.AddMesh(\"plane\", 2, 1, \"solid\", WHITE, BLACK);",
            &mut scene,
        )
        .unwrap_err();
        assert!(err.message.contains("at least 2"));

        let err = run(
            "scene.AddMesh(\"cube\", 1, 0, \"solid\", WHITE, BLACK);",
            &mut scene,
        )
        .unwrap_err();
        assert!(err.message.contains("at least 2"));
        assert!(scene.meshes().is_empty());
    }

    #[test]
    fn unknown_method_is_an_error() {
        let mut scene = Scene::new(1.0);
        let err = run("scene.Explode();", &mut scene).unwrap_err();
        assert!(err.message.contains("Explode"));
    }

    #[test]
    fn buffer_bindings_feed_custom_shaders() {
        let mut scene = Scene::new(1.0);
        let program =
            parse_str("scene.AddMesh(\"cube\", 1, 4, \"quads\", WHITE, BLACK, vs, fs);")
                .expect("parse");
        let mut bindings = Bindings::with_colors(&ColorTable::default());
        bindings.set_buffer("vs", "void main() { gl_Position = vec4(0.0); }");
        bindings.set_buffer("fs", "void main() { gl_FragColor = vec4(1.0); }");
        evaluate(&program, &mut scene, &mut bindings).expect("eval");
        assert_eq!(scene.meshes().len(), 1);
        assert_ne!(scene.meshes()[0].shader, scene::ShaderId::DEFAULT);
    }

    #[test]
    fn zero_optionals_mean_plain_lines() {
        let mut scene = Scene::new(1.0);
        run(
            "scene.AddLineMesh([0, 0, 0], [1, 0, 0], 0.02, 0, 0, WHITE);",
            &mut scene,
        )
        .expect("eval");
        assert_eq!(scene.meshes().len(), 1);
    }

    #[test]
    fn color_bindings_come_from_the_registry() {
        let bindings = Bindings::with_colors(&ColorTable::default());
        assert!(matches!(bindings.get("WHITE"), Some(Value::Vector(_))));
        assert!(bindings.get("scene").is_none());
    }
}
