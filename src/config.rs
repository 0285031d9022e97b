//! JSON run configuration for the demo binary.

use crate::types::Pixel;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Target width:height ratio for the rectified output.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct RatioConfig {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    /// Source image to rectify.
    pub input_path: PathBuf,
    /// Where to write the rectified PNG.
    pub output_path: PathBuf,
    /// Exactly four anchor pixels in source coordinates.
    pub anchors: Vec<Pixel>,
    /// Optional target ratio; the anchors' bounding box is used as-is when
    /// absent.
    #[serde(default)]
    pub ratio: Option<RatioConfig>,
    /// Optional path for a JSON report of the classified corners.
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<RunConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RunConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}
