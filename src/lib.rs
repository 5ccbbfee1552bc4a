//! treemap-rs: hierarchical treemap engine.
//!
//! The crate turns a nested JSON dataset into a weighted hierarchy, lays it
//! out as a padded squarified treemap and materializes a backend-agnostic
//! frame of draw primitives. SVG and (optionally) Cairo backends consume the
//! frame; a small tooltip state machine reacts to pointer events.

pub mod api;
pub mod core;
pub mod dataset;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TreemapChart, TreemapChartConfig};
pub use error::{TreemapError, TreemapResult};
