//! Scene model: meshes, labels, camera rig and shader catalog, plus the
//! edit-session rollback that keeps a broken re-evaluation from touching
//! the scene currently on screen.

pub mod camera;
pub mod floating_text;
pub mod mesh;
pub mod scene;
pub mod shaders;
pub mod transform;

pub use camera::{CameraConfig, CameraInput, CameraMode, CameraRig};
pub use floating_text::FloatingText;
pub use mesh::{
    CompareFunc, CullFace, DrawStyle, Mesh, RenderState, StencilOp, StencilState, UniformValue,
};
pub use scene::{MeshId, Scene, SceneError};
pub use shaders::{ShaderCatalog, ShaderId, ShaderProgramSource};
pub use transform::Transform;
