//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for the embedded page.
//! - `commit`: ChangeLine, Commit
//! - `plot`: PlotLayout, Tick, Mark, KeyedJoin, Tooltip
//! - `panel`: FileRow, BreakdownRow, SummaryStats
//! - `view`: ActiveView, TimelineView, NarrativeStep, SelectionView, ViewUpdate

pub mod commit;
pub mod panel;
pub mod plot;
pub mod view;

pub use commit::*;
pub use panel::*;
pub use plot::*;
pub use view::*;
