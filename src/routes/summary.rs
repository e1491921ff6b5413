//! Dataset summary endpoint.
//!
//! GET /api/v1/summary
//!
//! Returns total LOC, commit count, distinct files, max depth, longest line
//! and max lines per file over the whole dataset.
//! Used by: stats block above the scatter plot

use axum::{extract::State, routing::get, Json, Router};

use crate::error::{AppError, Result};
use crate::models::SummaryStats;
use crate::viz::SharedViz;

pub fn routes(viz: SharedViz) -> Router {
    Router::new()
        .route("/api/v1/summary", get(get_summary))
        .with_state(viz)
}

async fn get_summary(State(viz): State<SharedViz>) -> Result<Json<SummaryStats>> {
    let viz = viz.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    Ok(Json(viz.summary().clone()))
}
