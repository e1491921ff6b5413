//! Time slider endpoints.
//!
//! - GET /api/v1/timeline
//!   Current progress, cutoff instant, cutoff label and visible commit count.
//!
//! - POST /api/v1/timeline/progress { progress: number }
//!   Slider moved. Values outside [0, 100] are clamped. Returns the full
//!   `ViewUpdate` so the page redraws plot, file panel and selection together.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{TimelineView, ViewUpdate};
use crate::viz::SharedViz;

pub fn routes(viz: SharedViz) -> Router {
    Router::new()
        .route("/api/v1/timeline", get(get_timeline))
        .route("/api/v1/timeline/progress", post(set_progress))
        .with_state(viz)
}

async fn get_timeline(State(viz): State<SharedViz>) -> Result<Json<TimelineView>> {
    let viz = viz.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    Ok(Json(viz.timeline_view()))
}

#[derive(Debug, Deserialize)]
struct ProgressRequest {
    progress: f64,
}

async fn set_progress(
    State(viz): State<SharedViz>,
    Json(request): Json<ProgressRequest>,
) -> Result<Json<ViewUpdate>> {
    let mut viz = viz.write().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    let update = viz.set_progress(request.progress)?;
    Ok(Json(update))
}
