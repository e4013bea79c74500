pub mod basis;
pub mod geometry;
pub mod primitives;
pub mod shapes;
pub mod subdivide;
pub mod wireframe;

pub use basis::Basis;
pub use geometry::{Geometry, GeometryError, Topology};
pub use subdivide::{EDGE_INDEX_LIMIT, project_to_sphere, subdivide};
pub use wireframe::{extract_wireframe, quadrify_wireframe};
