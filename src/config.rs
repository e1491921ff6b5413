//! Runtime configuration.
//!
//! Defaults reproduce the published page layout. An optional TOML file may
//! override any field; `--repo-slug` on the command line wins over the file.
//!
//! ```toml
//! repo_slug = "owner/repo"
//!
//! [plot]
//! width = 1000.0
//! height = 600.0
//! min_radius = 2.0
//! max_radius = 30.0
//!
//! [plot.margin]
//! top = 10.0
//! right = 10.0
//! bottom = 30.0
//! left = 20.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{Margin, PlotLayout};

pub const DEFAULT_REPO_SLUG: &str = "BrightonLiu-zZ/portfolio";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizConfig {
    #[serde(default = "default_repo_slug")]
    pub repo_slug: String,
    #[serde(default)]
    pub plot: PlotConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            repo_slug: default_repo_slug(),
            plot: PlotConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Target tick count for the time axis
    pub x_ticks: usize,
    /// Target tick count for the hour axis
    pub y_ticks: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin {
                top: 10.0,
                right: 10.0,
                bottom: 30.0,
                left: 20.0,
            },
            min_radius: 2.0,
            max_radius: 30.0,
            x_ticks: 10,
            y_ticks: 10,
        }
    }
}

impl PlotConfig {
    pub fn layout(&self) -> PlotLayout {
        PlotLayout::new(self.width, self.height, self.margin)
    }

    pub fn radius_range(&self) -> (f64, f64) {
        (self.min_radius, self.max_radius)
    }
}

fn default_repo_slug() -> String {
    DEFAULT_REPO_SLUG.to_string()
}

/// Load the config file if one is given, otherwise return the defaults.
pub fn load_config(path: Option<&Path>) -> Result<VizConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => VizConfig::default(),
    };

    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &VizConfig) -> Result<(), ConfigError> {
    let usable = config.plot.layout().usable;
    if !(usable.width > 0.0 && usable.height > 0.0) {
        return Err(ConfigError::Invalid(format!(
            "plot area {}x{} leaves no room inside the margins",
            config.plot.width, config.plot.height
        )));
    }
    if !(config.plot.min_radius >= 0.0 && config.plot.min_radius <= config.plot.max_radius) {
        return Err(ConfigError::Invalid(format!(
            "radius range [{}, {}] is not ordered",
            config.plot.min_radius, config.plot.max_radius
        )));
    }
    if config.repo_slug.trim().is_empty() {
        return Err(ConfigError::Invalid("repo_slug must not be empty".to_string()));
    }
    Ok(())
}
