//! Commit-history visualization engine.
//!
//! - `scale`: linear/sqrt/time scales and the `CoordinateMapping`
//! - `render`: scatter plot scene, keyed marks, SVG output
//! - `selection`: brush hit testing
//! - `timeline`: slider progress ↔ cutoff instant
//! - `narrative`: scroll steps bound to commits
//! - `panels`: file units and language breakdown
//! - `context`: `VizContext`, the single owner of view state

pub mod context;
pub mod narrative;
pub mod panels;
pub mod render;
pub mod scale;
pub mod selection;
pub mod timeline;

#[cfg(test)]
pub mod test_support;

use std::sync::{Arc, RwLock};

pub use context::VizContext;

pub type SharedViz = Arc<RwLock<VizContext>>;
