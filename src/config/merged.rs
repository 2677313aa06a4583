use super::job::{Job, OutputFormat, Resample, SegmentMode, validate_zoom_factor};
use super::settings::Settings;

#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub mode: SegmentMode,
    pub threshold: u8,
    pub merge_proximity: u32,
    pub padding: u32,
    pub zoom: f64,
    pub resample: Resample,
    pub format: OutputFormat,
    pub jpeg_quality: u8,
    pub parallel_workers: usize,
    pub manifest: bool,
}

impl MergedConfig {
    /// JobのOption値がSomeならJobの値を、NoneならSettingsの値を使用する。
    pub fn new(settings: &Settings, job: &Job) -> Self {
        MergedConfig {
            mode: job.mode.unwrap_or(settings.mode),
            threshold: job.threshold.unwrap_or(settings.threshold),
            merge_proximity: job.merge_proximity.unwrap_or(settings.merge_proximity),
            padding: job.padding.unwrap_or(settings.padding),
            zoom: job.zoom.unwrap_or(settings.zoom),
            resample: job.resample.unwrap_or(settings.resample),
            format: job.format.unwrap_or(settings.format),
            jpeg_quality: job.jpeg_quality.unwrap_or(settings.jpeg_quality),
            parallel_workers: settings.parallel_workers,
            manifest: job.manifest.unwrap_or(settings.manifest),
        }
    }

    /// 値域チェック。デシリアライズ時に弾けない組み合わせをここで検出する。
    pub fn validate(&self) -> crate::error::Result<()> {
        validate_zoom_factor(self.zoom)?;
        if self.format == OutputFormat::Jpeg && !(1..=100).contains(&self.jpeg_quality) {
            return Err(crate::error::SegZoomError::config(format!(
                "jpeg_quality must be 1-100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}
