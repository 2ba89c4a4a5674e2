//! Proximity radar layout core.
//!
//! Places scored news signals on a radar: the signal's region picks its
//! direction, its proximity score picks its distance from the center, and a
//! short repulsion pass keeps markers from piling on top of each other.

mod entity;
mod error;
pub mod layout;
mod output;
mod wasm;

pub use entity::{Entity, Plottable};
pub use error::{RadarError, Result};
pub use layout::{
    CategoryAngleTable, PlacedNode, PointF, RadarConfig, RadarLayout, compute_layout,
    compute_layout_seeded,
};
pub use output::{ErrorInfo, NodeOutput, RadarInput, RadarOutput, error_json, layout_json};
