//! The interpreter boundary between editor text and the scene: source
//! preprocessing, a small statement language (`let` bindings plus
//! `scene.<builder>(...)` calls) and an evaluator that reaches the scene
//! only through an explicit binding table.

pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod source;

pub use error::{EvalError, ParseError, ScriptError};
pub use eval::{Bindings, Value, evaluate};
pub use parser::{Expr, Program, Stmt, parse_str};
pub use source::{SourceBuffers, source_hash, split_buffers};

use foundation::color::ColorTable;
use scene::Scene;

/// One full evaluation cycle: split buffers, parse the executable part,
/// then rebuild the scene inside an edit session. A failure at any stage
/// leaves the scene exactly as it was.
pub fn run_source(src: &str, scene: &mut Scene, colors: &ColorTable) -> Result<(), ScriptError> {
    let buffers = split_buffers(src);
    let program = parse_str(&buffers.main)?;

    let mut bindings = Bindings::with_colors(colors);
    for (name, text) in &buffers.named {
        bindings.set_buffer(name, text);
    }

    scene.edit(|scene| evaluate(&program, scene, &mut bindings))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run_source;
    use foundation::color::ColorTable;
    use foundation::math::Vec3;
    use scene::Scene;

    #[test]
    fn run_source_commits_a_valid_edit() {
        let mut scene = Scene::new(1.0);
        run_source(
            "scene.AddSphereMesh([0, 0, 0], 1, 1, WHITE);",
            &mut scene,
            &ColorTable::default(),
        )
        .expect("run");
        assert_eq!(scene.meshes().len(), 1);
    }

    #[test]
    fn failed_evaluation_preserves_the_previous_scene() {
        let mut scene = Scene::new(1.0);
        let colors = ColorTable::default();
        run_source(
            "scene.AddSphereMesh([0, 0, 0], 1, 1, WHITE);",
            &mut scene,
            &colors,
        )
        .expect("seed");

        let err = run_source(
            "scene.AddSphereMesh([0, 0, 0], 1, 1, WHITE);\n\
             scene.AddSphereMesh([1, 0, 0], 1, 1, WHITE);\n\
             scene.Nonsense();",
            &mut scene,
            &colors,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Nonsense"));
        assert_eq!(scene.meshes().len(), 1);
    }

    #[test]
    fn parse_failure_never_touches_the_scene() {
        let mut scene = Scene::new(1.0);
        scene.add_floating_text("keep", Vec3::ZERO, None);
        let generation = scene.generation();

        assert!(run_source("let =;", &mut scene, &ColorTable::default()).is_err());
        assert_eq!(scene.labels().len(), 1);
        assert_eq!(scene.generation(), generation);
    }

    #[test]
    fn named_buffers_reach_builder_calls() {
        let mut scene = Scene::new(1.0);
        run_source(
            "scene.AddMesh(\"plane\", 1, 4, \"solid\", WHITE, BLACK, vs, fs);\n\
             //@buffer(vs)\n\
             attribute vec3 glVertex; void main() { gl_Position = vec4(glVertex, 1.0); }\n\
             //@buffer(fs)\n\
             void main() { gl_FragColor = vec4(1.0); }\n",
            &mut scene,
            &ColorTable::default(),
        )
        .expect("run");
        assert_eq!(scene.shaders().len(), 2);
    }
}
