//! Aggregate panel endpoints.
//!
//! - GET /api/v1/panels/files
//!   Files of the visible (cutoff) commits, largest first, one unit per line.
//!
//! - GET /api/v1/panels/languages
//!   Line counts per type for the brushed commits. Empty without a brush.

use axum::{extract::State, routing::get, Json, Router};

use crate::error::{AppError, Result};
use crate::models::{BreakdownRow, FilesView};
use crate::viz::SharedViz;

pub fn routes(viz: SharedViz) -> Router {
    Router::new()
        .route("/api/v1/panels/files", get(get_files))
        .route("/api/v1/panels/languages", get(get_languages))
        .with_state(viz)
}

async fn get_files(State(viz): State<SharedViz>) -> Result<Json<FilesView>> {
    let viz = viz.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    Ok(Json(viz.files_view()))
}

async fn get_languages(State(viz): State<SharedViz>) -> Result<Json<Vec<BreakdownRow>>> {
    let viz = viz.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    Ok(Json(viz.selection_view().breakdown))
}
