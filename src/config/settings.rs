use std::path::Path;

use serde::Deserialize;

use super::job::{OutputFormat, Resample, SegmentMode, deserialize_zoom};
use crate::imaging::binarize::DEFAULT_THRESHOLD;
use crate::segment::phrases::DEFAULT_MERGE_PROXIMITY;

pub const DEFAULT_PADDING: u32 = 5;
pub const DEFAULT_ZOOM: f64 = 20.0;
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// settings.yaml の内容。省略されたキーはデフォルト値になる。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: SegmentMode,
    pub threshold: u8,
    pub merge_proximity: u32,
    pub padding: u32,
    #[serde(deserialize_with = "deserialize_zoom")]
    pub zoom: f64,
    pub resample: Resample,
    pub format: OutputFormat,
    pub jpeg_quality: u8,
    pub parallel_workers: usize,
    pub manifest: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mode: SegmentMode::Line,
            threshold: DEFAULT_THRESHOLD,
            merge_proximity: DEFAULT_MERGE_PROXIMITY,
            padding: DEFAULT_PADDING,
            zoom: DEFAULT_ZOOM,
            resample: Resample::Nearest,
            format: OutputFormat::Png,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            parallel_workers: 1,
            manifest: true,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            crate::error::SegZoomError::config(format!("Failed to parse settings YAML: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
