use console_error_panic_hook::set_once;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use foundation::color::ColorTable;
use gpu::ClearSpec;
use scene::{CameraInput, CameraMode, Scene};

mod comments;
mod editor;
mod labels;
mod webgl;

use editor::{DEFAULT_SOURCE, Editor};
use webgl::GlContext;

const LABELS_CONTAINER_ID: &str = "sandbox-labels";
const COMMENTS_CONTAINER_ID: &str = "comments";

/// Pressed movement keys plus the pointer drag accumulated since the
/// last frame.
#[derive(Debug, Copy, Clone, Default)]
struct InputState {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    drag_x: f32,
    drag_y: f32,
}

impl InputState {
    fn take_camera_input(&mut self) -> CameraInput {
        let input = CameraInput {
            forward: self.forward,
            back: self.back,
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            rotate_delta: [self.drag_x, self.drag_y],
        };
        self.drag_x = 0.0;
        self.drag_y = 0.0;
        input
    }
}

pub struct SandboxState {
    pub scene: Option<Scene>,
    gl: Option<GlContext>,
    editor: Editor,
    colors: ColorTable,
    input: InputState,
    canvas_width: f32,
    canvas_height: f32,
}

thread_local! {
    static STATE: RefCell<SandboxState> = RefCell::new(SandboxState {
        scene: None,
        gl: None,
        editor: Editor::new("sandbox"),
        colors: ColorTable::default(),
        input: InputState::default(),
        canvas_width: 1280.0,
        canvas_height: 720.0,
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// One-time setup. On context-acquisition failure the error is reported
/// to the caller once and no render loop should be started.
#[wasm_bindgen]
pub fn init(canvas_id: &str, namespace: &str) -> Result<(), JsValue> {
    let mut gl = webgl::init_from_canvas_id(canvas_id).map_err(|err| {
        web_sys::console::log_1(&err);
        err
    })?;

    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let aspect = if s.canvas_height > 0.0 {
            s.canvas_width / s.canvas_height
        } else {
            1.0
        };
        let scene = Scene::new(aspect);
        // The default program must link before anything can draw.
        webgl::compile_new_programs(&mut gl, &scene).map_err(|err| {
            web_sys::console::log_1(&err);
            err
        })?;
        s.scene = Some(scene);
        s.gl = Some(gl);
        s.editor = Editor::new(namespace);
        Ok(())
    })
}

/// The source buffer the editor should open with: last persisted code,
/// or the seed program on first visit.
#[wasm_bindgen]
pub fn initial_source() -> String {
    STATE.with(|state| {
        let key = state.borrow().editor.storage_key();
        editor::load_persisted(&key).unwrap_or_else(|| DEFAULT_SOURCE.to_string())
    })
}

/// One full re-evaluation: parse, evaluate into an edit session, then
/// compile any newly interned shader programs while the session can
/// still roll back. A failure at any stage restores the previous scene
/// and yields the message for the status line.
fn apply_source(
    src: &str,
    scene: &mut Scene,
    colors: &ColorTable,
    mut compile: impl FnMut(&Scene) -> Result<(), String>,
) -> Result<(), String> {
    let buffers = script::split_buffers(src);
    let program = script::parse_str(&buffers.main).map_err(|err| err.to_string())?;

    let mut bindings = script::Bindings::with_colors(colors);
    for (name, text) in &buffers.named {
        bindings.set_buffer(name, text);
    }

    scene.edit(|scene| {
        script::evaluate(&program, scene, &mut bindings).map_err(|err| err.to_string())?;
        compile(scene)
    })
}

fn shader_error_text(err: JsValue) -> String {
    err.as_string()
        .unwrap_or_else(|| "shader compilation failed".to_string())
}

/// Editor poll tick. Returns the new status line, or an empty string
/// when the source is unchanged since the last poll.
#[wasm_bindgen]
pub fn poll_source(src: &str) -> String {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let SandboxState {
            scene,
            gl,
            editor: live_editor,
            colors,
            ..
        } = &mut *s;
        if !live_editor.source_changed(src) {
            return String::new();
        }
        let Some(scene) = scene.as_mut() else {
            return String::new();
        };
        let result = apply_source(src, scene, colors, |scene| match gl.as_mut() {
            Some(gl) => webgl::compile_new_programs(gl, scene).map_err(shader_error_text),
            None => Ok(()),
        });
        match result {
            Ok(()) => {
                editor::persist(&live_editor.storage_key(), src);
                "OK".to_string()
            }
            Err(message) => message,
        }
    })
}

/// One animation frame: apply buffered input, re-plan the frame and
/// hand it to the WebGL backend.
#[wasm_bindgen]
pub fn frame() -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let s = &mut *s;

        let (Some(scene), Some(gl)) = (s.scene.as_mut(), s.gl.as_mut()) else {
            return Ok(());
        };

        scene.camera.apply_input(s.input.take_camera_input());
        scene.camera.update_matrices();

        let plan = gpu::plan_frame(scene, s.canvas_width, s.canvas_height);
        webgl::sync_buffers(gl, scene)?;
        webgl::render(
            gl,
            &plan,
            ClearSpec::default(),
            s.canvas_width as i32,
            s.canvas_height as i32,
        )?;
        labels::update_labels(LABELS_CONTAINER_ID, scene, &plan.labels)
    })
}

#[wasm_bindgen]
pub fn set_canvas_sizes(width: f64, height: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.canvas_width = width as f32;
        s.canvas_height = height as f32;
        if let Some(scene) = s.scene.as_mut() {
            let aspect = if height > 0.0 {
                (width / height) as f32
            } else {
                1.0
            };
            scene.camera.set_aspect_ratio(aspect);
        }
    });
}

#[wasm_bindgen]
pub fn set_camera_mode(mode: &str) -> Result<(), JsValue> {
    let mode = match mode {
        "fly" => CameraMode::Fly,
        "rotate" => CameraMode::Rotate,
        other => {
            return Err(JsValue::from_str(&format!("unknown camera mode {other:?}")));
        }
    };
    STATE.with(|state| {
        if let Some(scene) = state.borrow_mut().scene.as_mut() {
            scene.camera.mode = mode;
        }
    });
    Ok(())
}

/// Movement key edge, by action name.
#[wasm_bindgen]
pub fn set_key(action: &str, down: bool) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        match action {
            "forward" => s.input.forward = down,
            "back" => s.input.back = down,
            "left" => s.input.left = down,
            "right" => s.input.right = down,
            "up" => s.input.up = down,
            "down" => s.input.down = down,
            _ => {}
        }
    });
}

/// Pointer drag delta in pixels; accumulated until the next frame.
#[wasm_bindgen]
pub fn pointer_drag(delta_x_px: f64, delta_y_px: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.input.drag_x += delta_x_px as f32;
        s.input.drag_y += delta_y_px as f32;
    });
}

#[wasm_bindgen]
pub fn load_comments(url: String) {
    spawn_local(async move {
        match comments::fetch_comments(&url).await {
            Ok(list) => {
                if let Err(err) = comments::render_comments(COMMENTS_CONTAINER_ID, &list) {
                    web_sys::console::log_1(&err);
                }
            }
            Err(err) => {
                web_sys::console::log_1(&JsValue::from_str(&format!(
                    "failed to fetch comments: {err:?}"
                )));
            }
        }
    });
}
