// Per-image processing: binarize -> segment -> pad -> crop -> zoom -> encode
//
// Everything here works in memory. Nothing touches the filesystem, so the
// same input bytes and config always yield the same encoded segments.

use image::GrayImage;
use tracing::debug;

use crate::config::job::{OutputFormat, Resample, SegmentMode};
use crate::config::merged::MergedConfig;
use crate::config::settings::Settings;
use crate::imaging::binarize::binarize;
use crate::imaging::crop::{crop_gray, pad_region};
use crate::imaging::encode::{check_jpeg_dimensions, encode_gray};
use crate::imaging::resample::{zoom_image, zoomed_dimensions};
use crate::imaging::decode_grayscale;
use crate::output::writer::segment_file_name;
use crate::segment::lines::segment_lines;
use crate::segment::phrases::segment_phrases;
use crate::segment::{BoundingBox, Segment};

/// Parameters that affect the pixels of the produced segments.
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    pub mode: SegmentMode,
    pub threshold: u8,
    pub merge_proximity: u32,
    pub padding: u32,
    pub zoom: f64,
    pub resample: Resample,
    pub format: OutputFormat,
    pub jpeg_quality: u8,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        let settings = Settings::default();
        SegmentConfig {
            mode: settings.mode,
            threshold: settings.threshold,
            merge_proximity: settings.merge_proximity,
            padding: settings.padding,
            zoom: settings.zoom,
            resample: settings.resample,
            format: settings.format,
            jpeg_quality: settings.jpeg_quality,
        }
    }
}

impl From<&MergedConfig> for SegmentConfig {
    fn from(merged: &MergedConfig) -> Self {
        SegmentConfig {
            mode: merged.mode,
            threshold: merged.threshold,
            merge_proximity: merged.merge_proximity,
            padding: merged.padding,
            zoom: merged.zoom,
            resample: merged.resample,
            format: merged.format,
            jpeg_quality: merged.jpeg_quality,
        }
    }
}

/// One segment after crop, zoom and encoding.
#[derive(Debug, Clone)]
pub struct RenderedSegment {
    /// 0-based position in reading order.
    pub index: usize,
    pub segment: Segment,
    /// Bounds actually cropped from the page (after padding and clamping).
    pub padded: BoundingBox,
    /// Dimensions of the zoomed image.
    pub width: u32,
    pub height: u32,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Find segments on a grayscale page, in reading order.
///
/// Returns an empty vector when nothing is found; that is not an error.
pub fn detect_segments(gray: &GrayImage, config: &SegmentConfig) -> Vec<Segment> {
    let (width, height) = gray.dimensions();
    let segments: Vec<Segment> = match config.mode {
        SegmentMode::Whole => {
            if width == 0 || height == 0 {
                Vec::new()
            } else {
                vec![Segment::Whole(BoundingBox {
                    x1: 0,
                    y1: 0,
                    x2: width,
                    y2: height,
                })]
            }
        }
        SegmentMode::Line => {
            let mask = binarize(gray, config.threshold);
            segment_lines(&mask).into_iter().map(Segment::Line).collect()
        }
        SegmentMode::Phrase => {
            let mask = binarize(gray, config.threshold);
            segment_phrases(&mask, config.merge_proximity)
                .into_iter()
                .map(Segment::Phrase)
                .collect()
        }
    };
    debug!(mode = ?config.mode, count = segments.len(), "detected segments");
    segments
}

/// Pad, crop, zoom and encode a single segment.
pub fn render_segment(
    gray: &GrayImage,
    index: usize,
    segment: Segment,
    config: &SegmentConfig,
) -> crate::error::Result<RenderedSegment> {
    let (width, height) = gray.dimensions();
    let padded = pad_region(segment.bounds(width), config.padding, width, height);

    if config.format == OutputFormat::Jpeg {
        let (zoomed_width, zoomed_height) =
            zoomed_dimensions(padded.width(), padded.height(), config.zoom)?;
        check_jpeg_dimensions(zoomed_width, zoomed_height)?;
    }

    let cropped = crop_gray(gray, padded);
    let zoomed = zoom_image(&cropped, config.zoom, config.resample)?;
    let bytes = encode_gray(&zoomed, config.format, config.jpeg_quality)?;

    Ok(RenderedSegment {
        index,
        segment,
        padded,
        width: zoomed.width(),
        height: zoomed.height(),
        file_name: segment_file_name(config.mode, index, config.format),
        bytes,
    })
}

/// Render every segment. Fails on the first segment that cannot be rendered.
pub fn render_segments(
    gray: &GrayImage,
    segments: &[Segment],
    config: &SegmentConfig,
) -> crate::error::Result<Vec<RenderedSegment>> {
    segments
        .iter()
        .enumerate()
        .map(|(index, &segment)| render_segment(gray, index, segment, config))
        .collect()
}

/// Decode image bytes and run the whole in-memory pipeline.
pub fn process_image_bytes(
    bytes: &[u8],
    config: &SegmentConfig,
) -> crate::error::Result<Vec<RenderedSegment>> {
    let gray = decode_grayscale(bytes)?;
    let segments = detect_segments(&gray, config);
    render_segments(&gray, &segments, config)
}
