//! Backend-free frame planning: turns the scene into an ordered list of
//! draw passes and label placements that a graphics backend executes.

pub mod renderer;

pub use renderer::{
    ClearSpec, DrawPass, FramePlan, LabelPlacement, PassGeometry, plan_frame,
};
