/// GLSL fed to every mesh that does not supply its own vertex stage.
pub const DEFAULT_VERTEX_SHADER: &str = r#"
attribute vec3 glVertex;

uniform mat4 ObjectToClip;

varying vec3 ls_Position;

void main(void)
{
    ls_Position = glVertex;
    gl_Position = ObjectToClip * vec4(glVertex, 1.0);
}
"#;

/// GLSL fed to every mesh that does not supply its own fragment stage.
pub const DEFAULT_FRAGMENT_SHADER: &str = r#"
#ifdef GL_ES
precision highp float;
#endif

uniform vec3 glColour;

void main(void)
{
    gl_FragColor = vec4(glColour, 1.0);
}
"#;

/// Handle into the [`ShaderCatalog`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

impl ShaderId {
    /// The scene default program, always present at slot 0.
    pub const DEFAULT: ShaderId = ShaderId(0);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaderProgramSource {
    pub vertex: String,
    pub fragment: String,
}

/// Explicit shader source registry, deduplicated by content.
///
/// The catalog only stores source text; compilation happens in the
/// rendering backend, which caches compiled programs per [`ShaderId`] so
/// a broken edit can keep the previous working program alive.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderCatalog {
    programs: Vec<ShaderProgramSource>,
}

impl Default for ShaderCatalog {
    fn default() -> Self {
        Self {
            programs: vec![ShaderProgramSource {
                vertex: DEFAULT_VERTEX_SHADER.to_string(),
                fragment: DEFAULT_FRAGMENT_SHADER.to_string(),
            }],
        }
    }
}

impl ShaderCatalog {
    /// Resolves a program for optional custom stage sources, falling back
    /// to the default program stages for whichever is absent.
    pub fn intern(&mut self, vertex: Option<&str>, fragment: Option<&str>) -> ShaderId {
        if vertex.is_none() && fragment.is_none() {
            return ShaderId::DEFAULT;
        }

        let vertex = vertex.unwrap_or(DEFAULT_VERTEX_SHADER);
        let fragment = fragment.unwrap_or(DEFAULT_FRAGMENT_SHADER);

        if let Some(pos) = self
            .programs
            .iter()
            .position(|p| p.vertex == vertex && p.fragment == fragment)
        {
            return ShaderId(pos as u32);
        }

        self.programs.push(ShaderProgramSource {
            vertex: vertex.to_string(),
            fragment: fragment.to_string(),
        });
        ShaderId((self.programs.len() - 1) as u32)
    }

    pub fn get(&self, id: ShaderId) -> Option<&ShaderProgramSource> {
        self.programs.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
