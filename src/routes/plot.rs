//! Scatter plot endpoints.
//!
//! - GET /api/v1/plot
//!   Layout, axis ticks, gridlines and marks (with selected/hovered state)
//!   for the current cutoff view.
//!
//! - GET /api/v1/plot.svg
//!   The same scene as standalone SVG markup.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{PlotLayout, PlotView};
use crate::viz::SharedViz;

pub fn routes(viz: SharedViz) -> Router {
    Router::new()
        .route("/api/v1/plot", get(get_plot))
        .route("/api/v1/plot.svg", get(get_plot_svg))
        .with_state(viz)
}

#[derive(Debug, Serialize)]
struct PlotResponse {
    layout: PlotLayout,
    plot: PlotView,
}

async fn get_plot(State(viz): State<SharedViz>) -> Result<Json<PlotResponse>> {
    let viz = viz.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    Ok(Json(PlotResponse {
        layout: *viz.scene().layout(),
        plot: viz.scene().view(),
    }))
}

async fn get_plot_svg(State(viz): State<SharedViz>) -> Result<impl IntoResponse> {
    let viz = viz.read().map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], viz.scene().to_svg()))
}
