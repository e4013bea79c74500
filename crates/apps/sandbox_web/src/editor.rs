use script::source_hash;

/// Seed program shown on first visit (no persisted source yet).
pub const DEFAULT_SOURCE: &str = r#"let R = 1.2;

scene.AddSphereMesh([0, 0, 0], R, 3, BLUE);
scene.AddMesh("cube", 1.6, 8, "quads", GREY, WHITE);
scene.AddCircleLineMesh([0, 0, 0], 64, 1.8, 0.02, YELLOW);
scene.AddLineMesh([-2, 0, 0], [2, 0, 0], 0.02, 0.08, 0, RED);
scene.AddMeasure([-1, -1.6, 0], [1, -1.6, 0], -0.4, "2.0", [0, -0.25, 0], WHITE);
scene.AddFloatingText("r = 1.2", [0, 1.5, 0]);
"#;

const STORAGE_SUFFIX: &str = "_Code";

/// Change detection for the editor poll tick. Holds the hash of the
/// last source that was handed to the evaluator, successful or not.
#[derive(Debug, Clone)]
pub struct Editor {
    namespace: String,
    last_hash: Option<u32>,
}

impl Editor {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            last_hash: None,
        }
    }

    pub fn storage_key(&self) -> String {
        format!("{}{}", self.namespace, STORAGE_SUFFIX)
    }

    /// True when the source content differs from the last poll; records
    /// the new hash either way so an unchanged buffer stays quiet.
    pub fn source_changed(&mut self, src: &str) -> bool {
        let hash = source_hash(src);
        if self.last_hash == Some(hash) {
            return false;
        }
        self.last_hash = Some(hash);
        true
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_persisted(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(key).ok()?
}

#[cfg(target_arch = "wasm32")]
pub fn persist(key: &str, src: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(key, src);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_persisted(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn persist(_key: &str, _src: &str) {}

#[cfg(test)]
mod tests {
    use super::Editor;

    #[test]
    fn storage_key_is_namespaced() {
        assert_eq!(Editor::new("sandbox").storage_key(), "sandbox_Code");
    }

    #[test]
    fn unchanged_source_is_quiet() {
        let mut editor = Editor::new("t");
        assert!(editor.source_changed("a"));
        assert!(!editor.source_changed("a"));
        assert!(editor.source_changed("b"));
        assert!(editor.source_changed("a"));
    }
}
