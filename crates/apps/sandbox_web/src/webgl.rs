#[cfg(target_arch = "wasm32")]
mod imp {
    use std::collections::HashMap;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        WebGlBuffer, WebGlProgram, WebGlRenderingContext as Gl, WebGlShader, WebGlUniformLocation,
    };

    use geometry::Topology;
    use gpu::{ClearSpec, DrawPass, FramePlan, PassGeometry};
    use scene::{CompareFunc, CullFace, Scene, StencilOp, UniformValue};

    struct ProgramEntry {
        program: WebGlProgram,
        vertex_attrib: u32,
        object_to_clip: WebGlUniformLocation,
        color: Option<WebGlUniformLocation>,
    }

    struct MeshBuffers {
        vertex: WebGlBuffer,
        index: WebGlBuffer,
        index_count: i32,
        wireframe: Option<(WebGlBuffer, i32)>,
    }

    pub struct GlContext {
        gl: Gl,
        _canvas: web_sys::HtmlCanvasElement,
        // Keyed by ShaderId value; entries survive re-evaluation so a
        // broken edit keeps the previous working programs alive.
        programs: HashMap<u32, ProgramEntry>,
        // Compile logs for ids that failed to link. The catalog never
        // reassigns an id, so resubmitting the same source reports the
        // recorded log instead of retrying every poll.
        failed_programs: HashMap<u32, String>,
        meshes: Vec<MeshBuffers>,
        buffers_generation: u64,
    }

    pub fn init_from_canvas_id(canvas_id: &str) -> Result<GlContext, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window missing"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("document missing"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas missing"))?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        let gl = canvas
            .get_context("webgl")?
            .ok_or_else(|| JsValue::from_str("WebGL context unavailable"))?
            .dyn_into::<Gl>()?;

        gl.enable(Gl::DEPTH_TEST);

        Ok(GlContext {
            gl,
            _canvas: canvas,
            programs: HashMap::new(),
            failed_programs: HashMap::new(),
            meshes: Vec::new(),
            buffers_generation: u64::MAX,
        })
    }

    fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
        let shader = gl
            .create_shader(kind)
            .ok_or_else(|| JsValue::from_str("shader allocation failed"))?;
        gl.shader_source(&shader, source);
        gl.compile_shader(&shader);
        if gl
            .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            Ok(shader)
        } else {
            let log = gl
                .get_shader_info_log(&shader)
                .unwrap_or_else(|| "unknown compile error".to_string());
            Err(JsValue::from_str(&format!("shader compile failed: {log}")))
        }
    }

    fn link_program(gl: &Gl, vertex: &str, fragment: &str) -> Result<ProgramEntry, JsValue> {
        let vs = compile_shader(gl, Gl::VERTEX_SHADER, vertex)?;
        let fs = compile_shader(gl, Gl::FRAGMENT_SHADER, fragment)?;

        let program = gl
            .create_program()
            .ok_or_else(|| JsValue::from_str("program allocation failed"))?;
        gl.attach_shader(&program, &vs);
        gl.attach_shader(&program, &fs);
        gl.link_program(&program);
        if !gl
            .get_program_parameter(&program, Gl::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            let log = gl
                .get_program_info_log(&program)
                .unwrap_or_else(|| "unknown link error".to_string());
            return Err(JsValue::from_str(&format!("program link failed: {log}")));
        }

        let vertex_attrib = gl.get_attrib_location(&program, "glVertex");
        if vertex_attrib < 0 {
            return Err(JsValue::from_str("program is missing the glVertex attribute"));
        }
        let object_to_clip = gl
            .get_uniform_location(&program, "ObjectToClip")
            .ok_or_else(|| JsValue::from_str("program is missing the ObjectToClip uniform"))?;
        // The colour uniform stays optional so custom fragment stages can
        // compute their own output.
        let color = gl.get_uniform_location(&program, "glColour");

        Ok(ProgramEntry {
            program,
            vertex_attrib: vertex_attrib as u32,
            object_to_clip,
            color,
        })
    }

    fn create_index_buffer(gl: &Gl, indices: &[u16]) -> Result<WebGlBuffer, JsValue> {
        let buffer = gl
            .create_buffer()
            .ok_or_else(|| JsValue::from_str("index buffer allocation failed"))?;
        gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&buffer));
        gl.buffer_data_with_u8_array(
            Gl::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(indices),
            Gl::STATIC_DRAW,
        );
        Ok(buffer)
    }

    /// Compiles every interned shader program without a live GL program
    /// yet. Runs inside the scene edit session so a compile or link
    /// failure rolls the whole edit back before anything is committed.
    pub fn compile_new_programs(ctx: &mut GlContext, scene: &Scene) -> Result<(), JsValue> {
        for id in 0..scene.shaders().len() as u32 {
            if ctx.programs.contains_key(&id) {
                continue;
            }
            if let Some(log) = ctx.failed_programs.get(&id) {
                return Err(JsValue::from_str(log));
            }
            if let Some(source) = scene.shaders().get(scene::ShaderId(id)) {
                match link_program(&ctx.gl, &source.vertex, &source.fragment) {
                    Ok(entry) => {
                        ctx.programs.insert(id, entry);
                    }
                    Err(err) => {
                        let log = err
                            .as_string()
                            .unwrap_or_else(|| "shader compilation failed".to_string());
                        ctx.failed_programs.insert(id, log.clone());
                        return Err(JsValue::from_str(&log));
                    }
                }
            }
        }
        Ok(())
    }

    /// Rebuilds the mesh buffer cache when the scene generation has
    /// moved on.
    pub fn sync_buffers(ctx: &mut GlContext, scene: &Scene) -> Result<(), JsValue> {
        if ctx.buffers_generation == scene.generation() {
            return Ok(());
        }

        // Dropped WebGlBuffer handles are collected by the JS runtime.
        ctx.meshes.clear();
        for mesh in scene.meshes() {
            let floats: Vec<f32> = mesh
                .geometry
                .vertices
                .iter()
                .flat_map(|v| v.to_array())
                .collect();

            let vertex = ctx
                .gl
                .create_buffer()
                .ok_or_else(|| JsValue::from_str("vertex buffer allocation failed"))?;
            ctx.gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&vertex));
            ctx.gl.buffer_data_with_u8_array(
                Gl::ARRAY_BUFFER,
                bytemuck::cast_slice(&floats),
                Gl::STATIC_DRAW,
            );

            let index = create_index_buffer(&ctx.gl, &mesh.geometry.indices)?;
            let wireframe = match &mesh.wireframe_indices {
                Some(wires) => Some((create_index_buffer(&ctx.gl, wires)?, wires.len() as i32)),
                None => None,
            };

            ctx.meshes.push(MeshBuffers {
                vertex,
                index,
                index_count: mesh.geometry.indices.len() as i32,
                wireframe,
            });
        }
        ctx.buffers_generation = scene.generation();
        Ok(())
    }

    pub fn render(
        ctx: &GlContext,
        plan: &FramePlan,
        clear: ClearSpec,
        width: i32,
        height: i32,
    ) -> Result<(), JsValue> {
        let gl = &ctx.gl;
        gl.viewport(0, 0, width, height);
        gl.clear_color(clear.color[0], clear.color[1], clear.color[2], 1.0);
        gl.clear_depth(clear.depth);
        gl.clear_stencil(clear.stencil);
        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT | Gl::STENCIL_BUFFER_BIT);

        for pass in &plan.passes {
            draw_pass(ctx, pass)?;
        }
        gl.depth_range(0.0, 1.0);
        Ok(())
    }

    fn draw_pass(ctx: &GlContext, pass: &DrawPass) -> Result<(), JsValue> {
        let gl = &ctx.gl;
        let entry = ctx
            .programs
            .get(&pass.shader.0)
            .ok_or_else(|| JsValue::from_str("draw pass references an unknown program"))?;
        let buffers = ctx
            .meshes
            .get(pass.mesh_index)
            .ok_or_else(|| JsValue::from_str("draw pass references an unknown mesh"))?;

        gl.use_program(Some(&entry.program));
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buffers.vertex));
        gl.vertex_attrib_pointer_with_i32(entry.vertex_attrib, 3, Gl::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(entry.vertex_attrib);

        gl.uniform_matrix4fv_with_f32_array(
            Some(&entry.object_to_clip),
            false,
            &flatten(pass.object_to_clip),
        );
        if let Some(color) = &entry.color {
            gl.uniform3f(Some(color), pass.color[0], pass.color[1], pass.color[2]);
        }
        // Per-mesh overrides are soft lookups; a name the shader does not
        // declare is skipped.
        for (name, value) in &pass.uniforms {
            let Some(location) = gl.get_uniform_location(&entry.program, name) else {
                continue;
            };
            match value {
                UniformValue::Float(v) => gl.uniform1f(Some(&location), *v),
                UniformValue::Vector3(v) => gl.uniform3f(Some(&location), v.x, v.y, v.z),
            }
        }

        gl.depth_range(pass.depth_range[0], pass.depth_range[1]);

        match pass.state.cull {
            Some(face) => {
                gl.enable(Gl::CULL_FACE);
                gl.cull_face(match face {
                    CullFace::Front => Gl::FRONT,
                    CullFace::Back => Gl::BACK,
                });
            }
            None => gl.disable(Gl::CULL_FACE),
        }

        match pass.state.stencil {
            Some(stencil) => {
                gl.enable(Gl::STENCIL_TEST);
                gl.stencil_op(
                    stencil_op(stencil.fail),
                    stencil_op(stencil.depth_fail),
                    stencil_op(stencil.pass),
                );
                gl.stencil_func(compare_func(stencil.func), stencil.reference as i32, 0xff);
            }
            None => gl.disable(Gl::STENCIL_TEST),
        }

        match pass.geometry {
            PassGeometry::Fill(topology) => {
                let mode = match topology {
                    Topology::TriangleStrip => Gl::TRIANGLE_STRIP,
                    Topology::TriangleList => Gl::TRIANGLES,
                };
                gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&buffers.index));
                gl.draw_elements_with_i32(mode, buffers.index_count, Gl::UNSIGNED_SHORT, 0);
            }
            PassGeometry::Wireframe => {
                if let Some((buffer, count)) = &buffers.wireframe {
                    gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(buffer));
                    gl.draw_elements_with_i32(Gl::LINES, *count, Gl::UNSIGNED_SHORT, 0);
                }
            }
        }
        Ok(())
    }

    fn stencil_op(op: StencilOp) -> u32 {
        match op {
            StencilOp::Keep => Gl::KEEP,
            StencilOp::Zero => Gl::ZERO,
            StencilOp::Replace => Gl::REPLACE,
            StencilOp::Increment => Gl::INCR,
            StencilOp::Decrement => Gl::DECR,
            StencilOp::Invert => Gl::INVERT,
        }
    }

    fn compare_func(func: CompareFunc) -> u32 {
        match func {
            CompareFunc::Never => Gl::NEVER,
            CompareFunc::Less => Gl::LESS,
            CompareFunc::Equal => Gl::EQUAL,
            CompareFunc::LessEqual => Gl::LEQUAL,
            CompareFunc::Greater => Gl::GREATER,
            CompareFunc::NotEqual => Gl::NOTEQUAL,
            CompareFunc::GreaterEqual => Gl::GEQUAL,
            CompareFunc::Always => Gl::ALWAYS,
        }
    }

    fn flatten(matrix: foundation::math::Mat4) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for (col, column) in matrix.0.iter().enumerate() {
            out[col * 4..col * 4 + 4].copy_from_slice(column);
        }
        out
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use wasm_bindgen::prelude::JsValue;

    use gpu::{ClearSpec, FramePlan};
    use scene::Scene;

    #[derive(Debug, Default)]
    pub struct GlContext;

    pub fn init_from_canvas_id(_canvas_id: &str) -> Result<GlContext, JsValue> {
        Err(JsValue::from_str(
            "WebGL initialization is only available on wasm32 targets",
        ))
    }

    pub fn compile_new_programs(_ctx: &mut GlContext, _scene: &Scene) -> Result<(), JsValue> {
        Ok(())
    }

    pub fn sync_buffers(_ctx: &mut GlContext, _scene: &Scene) -> Result<(), JsValue> {
        Ok(())
    }

    pub fn render(
        _ctx: &GlContext,
        _plan: &FramePlan,
        _clear: ClearSpec,
        _width: i32,
        _height: i32,
    ) -> Result<(), JsValue> {
        Err(JsValue::from_str(
            "WebGL rendering is only available on wasm32 targets",
        ))
    }
}

pub use imp::{GlContext, compile_new_programs, init_from_canvas_id, render, sync_buffers};
