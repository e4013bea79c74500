pub mod mat;
pub mod vec;

pub use mat::Mat4;
pub use vec::{Vec3, Vec4};
