use foundation::math::{Vec3, Vec4};

/// A screen-projected label anchored at a world position.
///
/// The label is re-projected every frame; records are never reused
/// across re-evaluations, since the whole list is discarded with the
/// mesh list.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingText {
    pub text: String,
    /// Homogeneous world anchor (w = 1), ready for the clip transform.
    pub position: Vec4,
    /// When set, the label is hidden while this normal faces away from
    /// the camera (back-face cull of the label only).
    pub facing: Option<Vec3>,
}

impl FloatingText {
    pub fn new(text: impl Into<String>, position: Vec3, facing: Option<Vec3>) -> Self {
        Self {
            text: text.into(),
            position: Vec4::from_point(position),
            facing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FloatingText;
    use foundation::math::Vec3;

    #[test]
    fn anchor_is_homogeneous() {
        let label = FloatingText::new("r = 1", Vec3::new(1.0, 2.0, 3.0), None);
        assert_eq!(label.position.w, 1.0);
        assert_eq!(label.position.xyz(), Vec3::new(1.0, 2.0, 3.0));
    }
}
