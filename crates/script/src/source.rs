/// Marker line opening a named text region inside a source buffer.
const BUFFER_MARKER_PREFIX: &str = "//@buffer(";
const BUFFER_MARKER_SUFFIX: &str = ")";

/// A source file split into its executable part and any named text
/// regions (typically custom shader stages referenced by name from the
/// executable part).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceBuffers {
    pub main: String,
    pub named: Vec<(String, String)>,
}

/// Splits a source string at `//@buffer(name)` marker lines.
///
/// Text before the first marker is the executable buffer; each marker
/// starts a named region running to the next marker or end of input.
/// Marker lines themselves belong to no region.
pub fn split_buffers(src: &str) -> SourceBuffers {
    let mut buffers = SourceBuffers::default();
    let mut current: Option<(String, String)> = None;

    for line in src.lines() {
        if let Some(name) = parse_marker(line) {
            if let Some(region) = current.take() {
                buffers.named.push(region);
            }
            current = Some((name.to_string(), String::new()));
            continue;
        }

        let target = match &mut current {
            Some((_, text)) => text,
            None => &mut buffers.main,
        };
        target.push_str(line);
        target.push('\n');
    }

    if let Some(region) = current {
        buffers.named.push(region);
    }

    buffers
}

fn parse_marker(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix(BUFFER_MARKER_PREFIX)?;
    let name = rest.strip_suffix(BUFFER_MARKER_SUFFIX)?;
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    Some(name)
}

/// sdbm content hash; cheap enough to run on every editor poll tick.
pub fn source_hash(src: &str) -> u32 {
    let mut hash: u32 = 5381;
    for c in src.chars() {
        hash = (c as u32)
            .wrapping_add(hash << 6)
            .wrapping_add(hash << 16)
            .wrapping_sub(hash);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::{source_hash, split_buffers};

    #[test]
    fn source_without_markers_is_all_main() {
        let buffers = split_buffers("scene.AddSphereMesh([0,0,0], 1, 2, WHITE);\n");
        assert!(buffers.named.is_empty());
        assert!(buffers.main.contains("AddSphereMesh"));
    }

    #[test]
    fn markers_split_named_regions() {
        let src = "let r = 1;\n//@buffer(vs)\nattribute vec3 glVertex;\n//@buffer(fs)\nvoid main() {}\n";
        let buffers = split_buffers(src);
        assert_eq!(buffers.main, "let r = 1;\n");
        assert_eq!(buffers.named.len(), 2);
        assert_eq!(buffers.named[0].0, "vs");
        assert!(buffers.named[0].1.contains("glVertex"));
        assert_eq!(buffers.named[1].0, "fs");
        assert!(buffers.named[1].1.contains("void main"));
    }

    #[test]
    fn malformed_marker_stays_in_text() {
        let buffers = split_buffers("//@buffer()\ncode\n");
        assert!(buffers.named.is_empty());
        assert!(buffers.main.contains("//@buffer()"));
    }

    #[test]
    fn hash_is_stable_and_content_sensitive() {
        assert_eq!(source_hash(""), 5381);
        assert_eq!(source_hash("abc"), source_hash("abc"));
        assert_ne!(source_hash("abc"), source_hash("abd"));
    }
}
