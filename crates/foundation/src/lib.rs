pub mod color;
pub mod math;

// Foundation crate: small, well-tested primitives only.
pub use color::*;
pub use math::{Mat4, Vec3, Vec4};
