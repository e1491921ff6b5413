//! Brush selection endpoints.
//!
//! - GET /api/v1/selection
//!   Current selection count, label, selected ids and language breakdown.
//!
//! - PUT /api/v1/selection { selection: [[x0, y0], [x1, y1]] | null }
//!   Brush start/move/end. Corners are plot pixels, in any order.
//!   `null` clears the brush.
//!
//! - DELETE /api/v1/selection
//!   Brush cleared.

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::SelectionView;
use crate::viz::selection::BrushRect;
use crate::viz::SharedViz;

pub fn routes(viz: SharedViz) -> Router {
    Router::new()
        .route(
            "/api/v1/selection",
            get(get_selection).put(set_selection).delete(clear_selection),
        )
        .with_state(viz)
}

async fn get_selection(State(viz): State<SharedViz>) -> Result<Json<SelectionView>> {
    let viz = viz.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    Ok(Json(viz.selection_view()))
}

#[derive(Debug, Deserialize)]
struct SelectionRequest {
    #[serde(default)]
    selection: Option<[[f64; 2]; 2]>,
}

async fn set_selection(
    State(viz): State<SharedViz>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<SelectionView>> {
    let mut viz = viz.write().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    let view = viz.brush(request.selection.map(BrushRect::from_corners))?;
    Ok(Json(view))
}

async fn clear_selection(State(viz): State<SharedViz>) -> Result<Json<SelectionView>> {
    let mut viz = viz.write().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    let view = viz.brush(None)?;
    Ok(Json(view))
}
