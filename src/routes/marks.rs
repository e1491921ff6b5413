//! Mark hover endpoints (tooltip).
//!
//! - POST /api/v1/marks/{id}/enter { x, y }
//!   Pointer entered a mark: emphasize it and fill the tooltip at (x, y).
//!
//! - POST /api/v1/marks/{id}/leave
//!   Pointer left: reset emphasis and hide the tooltip.

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::Tooltip;
use crate::viz::SharedViz;

pub fn routes(viz: SharedViz) -> Router {
    Router::new()
        .route("/api/v1/marks/{id}/enter", post(enter_mark))
        .route("/api/v1/marks/{id}/leave", post(leave_mark))
        .with_state(viz)
}

#[derive(Debug, Default, Deserialize)]
struct PointerPosition {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
}

async fn enter_mark(
    State(viz): State<SharedViz>,
    Path(id): Path<String>,
    Json(pointer): Json<PointerPosition>,
) -> Result<Json<Tooltip>> {
    let mut viz = viz.write().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    let tooltip = viz.hover_enter(&id, pointer.x, pointer.y)?;
    Ok(Json(tooltip))
}

async fn leave_mark(
    State(viz): State<SharedViz>,
    Path(id): Path<String>,
) -> Result<Json<Tooltip>> {
    let mut viz = viz.write().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    let tooltip = viz.hover_leave(&id)?;
    Ok(Json(tooltip))
}
