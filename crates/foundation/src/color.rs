/// Linear RGB colour triplet.
pub type Color = [f32; 3];

pub const BLACK: Color = [0.0, 0.0, 0.0];
pub const WHITE: Color = [1.0, 1.0, 1.0];

/// Named colour registry.
///
/// Constructed once at startup and passed by reference into the
/// components that resolve colour names (no global mutable table).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    entries: Vec<(String, Color)>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            entries: vec![
                ("BLACK".to_string(), BLACK),
                ("WHITE".to_string(), WHITE),
                ("RED".to_string(), [1.0, 0.2, 0.2]),
                ("GREEN".to_string(), [0.2, 1.0, 0.2]),
                ("BLUE".to_string(), [0.3, 0.5, 1.0]),
                ("YELLOW".to_string(), [1.0, 1.0, 0.2]),
                ("GREY".to_string(), [0.5, 0.5, 0.5]),
            ],
        }
    }
}

impl ColorTable {
    pub fn get(&self, name: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, color)| *color)
    }

    /// Registers or replaces a named colour.
    pub fn set(&mut self, name: impl Into<String>, color: Color) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = color;
        } else {
            self.entries.push((name, color));
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorTable, WHITE};

    #[test]
    fn builtin_names_resolve() {
        let table = ColorTable::default();
        assert_eq!(table.get("WHITE"), Some(WHITE));
        assert_eq!(table.get("BLACK"), Some([0.0, 0.0, 0.0]));
        assert_eq!(table.get("MAGENTA"), None);
    }

    #[test]
    fn set_replaces_existing_entry() {
        let mut table = ColorTable::default();
        table.set("WHITE", [0.9, 0.9, 0.9]);
        assert_eq!(table.get("WHITE"), Some([0.9, 0.9, 0.9]));
        table.set("ORANGE", [1.0, 0.6, 0.1]);
        assert_eq!(table.get("ORANGE"), Some([1.0, 0.6, 0.1]));
    }
}
