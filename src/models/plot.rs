//! Scatter plot DTOs.
//!
//! - `PlotLayout` / `UsableArea`: canvas size and the rectangle inside the margins
//! - `Tick`: one axis tick with its pixel offset and label
//! - `Mark`: one circle per plotted commit, keyed by commit id
//! - `KeyedJoin`: which keys entered, stayed or left on the last re-bind
//! - `Tooltip`: hover panel contents and position

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsableArea {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub usable: UsableArea,
}

impl PlotLayout {
    pub fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
            usable: UsableArea {
                top: margin.top,
                right: width - margin.right,
                bottom: height - margin.bottom,
                left: margin.left,
                width: width - margin.left - margin.right,
                height: height - margin.top - margin.bottom,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub offset: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    pub id: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill_opacity: f64,
    pub selected: bool,
    pub hovered: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyedJoin {
    pub entered: Vec<String>,
    pub updated: Vec<String>,
    pub exited: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tooltip {
    pub visible: bool,
    pub commit_id: Option<String>,
    pub url: Option<String>,
    pub date: Option<String>,
    pub x: f64,
    pub y: f64,
}
