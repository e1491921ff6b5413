//! Scroll narrative endpoints.
//!
//! - GET /api/v1/narrative
//!   One step per plotted commit, in chronological order.
//!
//! - POST /api/v1/narrative/steps/{index}/enter
//!   The scroll observer entered a step. Moves the slider to the step's commit
//!   and returns the same `ViewUpdate` a slider change would.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::models::{NarrativeStep, ViewUpdate};
use crate::viz::SharedViz;

pub fn routes(viz: SharedViz) -> Router {
    Router::new()
        .route("/api/v1/narrative", get(list_steps))
        .route("/api/v1/narrative/steps/{index}/enter", post(enter_step))
        .with_state(viz)
}

async fn list_steps(State(viz): State<SharedViz>) -> Result<Json<Vec<NarrativeStep>>> {
    let viz = viz.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    Ok(Json(viz.steps().to_vec()))
}

async fn enter_step(
    State(viz): State<SharedViz>,
    Path(index): Path<usize>,
) -> Result<Json<ViewUpdate>> {
    let mut viz = viz.write().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    let update = viz.enter_step(index)?;
    Ok(Json(update))
}
