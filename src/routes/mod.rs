//! API route handlers - maps HTTP endpoints to engine events.
//!
//! Each submodule defines routes for a feature area:
//! - `summary`: Dataset statistics (GET /api/v1/summary)
//! - `plot`: Scatter plot scene as JSON or SVG
//! - `timeline`: Slider progress and cutoff
//! - `narrative`: Scroll steps and step-enter events
//! - `selection`: Brush selection and its breakdown
//! - `panels`: File units and language breakdown
//! - `marks`: Hover tooltip
//!
//! Every handler takes the context lock once, so each event is applied
//! atomically and the next one sees fully updated state.

pub mod marks;
pub mod narrative;
pub mod panels;
pub mod plot;
pub mod selection;
pub mod summary;
pub mod timeline;

use axum::Router;

use crate::viz::SharedViz;

pub fn create_router(viz: SharedViz) -> Router {
    Router::new()
        .merge(summary::routes(viz.clone()))
        .merge(plot::routes(viz.clone()))
        .merge(timeline::routes(viz.clone()))
        .merge(narrative::routes(viz.clone()))
        .merge(selection::routes(viz.clone()))
        .merge(panels::routes(viz.clone()))
        .merge(marks::routes(viz))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::VizConfig;
    use crate::viz::test_support::three_commits;
    use crate::viz::VizContext;

    fn app() -> Router {
        let context = VizContext::new(three_commits(), VizConfig::default());
        create_router(Arc::new(RwLock::new(context)))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn summary_reports_dataset_totals() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/api/v1/summary", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_loc"], 55);
        assert_eq!(body["total_commits"], 3);
        assert_eq!(body["files"], 3);
    }

    #[tokio::test]
    async fn slider_then_plot_shows_cutoff_view() {
        let app = app();

        let (status, update) = send(
            &app,
            Method::POST,
            "/api/v1/timeline/progress",
            Some(json!({ "progress": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(update["view"]["kind"], "cutoff");
        assert_eq!(update["timeline"]["visible_commits"], 1);

        let (_, plot) = send(&app, Method::GET, "/api/v1/plot", None).await;
        assert_eq!(plot["plot"]["marks"].as_array().map(Vec::len), Some(1));
        assert_eq!(plot["layout"]["usable"]["left"], 20.0);
    }

    #[tokio::test]
    async fn narrative_step_enter_moves_the_slider() {
        let app = app();

        let (status, update) =
            send(&app, Method::POST, "/api/v1/narrative/steps/1/enter", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(update["timeline"]["visible_commits"], 2);

        let (_, timeline) = send(&app, Method::GET, "/api/v1/timeline", None).await;
        assert_eq!(timeline["progress"], update["timeline"]["progress"]);

        let (status, body) =
            send(&app, Method::POST, "/api/v1/narrative/steps/99/enter", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap_or_default().contains("99"));
    }

    #[tokio::test]
    async fn brush_selects_and_clears() {
        let app = app();
        let (_, plot) = send(&app, Method::GET, "/api/v1/plot", None).await;
        let mark = plot["plot"]["marks"]
            .as_array()
            .and_then(|marks| marks.iter().find(|m| m["id"] == "c2"))
            .cloned()
            .expect("mark for c2");
        let (x, y) = (mark["cx"].as_f64().expect("cx"), mark["cy"].as_f64().expect("cy"));

        let (status, view) = send(
            &app,
            Method::PUT,
            "/api/v1/selection",
            Some(json!({ "selection": [[x + 2.0, y + 2.0], [x - 2.0, y - 2.0]] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["label"], "1 commits selected");

        let (_, languages) = send(&app, Method::GET, "/api/v1/panels/languages", None).await;
        assert_eq!(languages.as_array().map(Vec::len), Some(2));

        let (_, view) = send(&app, Method::DELETE, "/api/v1/selection", None).await;
        assert_eq!(view["label"], "No commits selected");
        let (_, languages) = send(&app, Method::GET, "/api/v1/panels/languages", None).await;
        assert_eq!(languages, json!([]));
    }

    #[tokio::test]
    async fn hover_fills_tooltip_and_rejects_unknown_marks() {
        let app = app();

        let (status, tooltip) = send(
            &app,
            Method::POST,
            "/api/v1/marks/c1/enter",
            Some(json!({ "x": 5.0, "y": 6.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tooltip["visible"], true);
        assert_eq!(tooltip["commit_id"], "c1");

        let (status, _) = send(&app, Method::POST, "/api/v1/marks/nope/leave", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn plot_svg_has_svg_content_type() {
        let app = app();
        let request = Request::builder()
            .uri("/api/v1/plot.svg")
            .body(Body::empty())
            .expect("request");

        let response = app.oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("image/svg+xml")
        );
    }

    #[tokio::test]
    async fn file_panel_follows_the_slider() {
        let app = app();

        let (_, files) = send(&app, Method::GET, "/api/v1/panels/files", None).await;
        assert_eq!(files["rows"][0]["file"], "src/app.js");
        assert_eq!(files["rows"][0]["lines"], 36);

        send(
            &app,
            Method::POST,
            "/api/v1/timeline/progress",
            Some(json!({ "progress": 0 })),
        )
        .await;
        let (_, files) = send(&app, Method::GET, "/api/v1/panels/files", None).await;
        assert_eq!(files["rows"][0]["lines"], 6);
        assert_eq!(files["join"]["exited"], json!(["index.html"]));
    }
}
