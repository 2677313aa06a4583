use image::GrayImage;
use image::imageops::{self, FilterType};

use crate::config::job::Resample;
use crate::error::SegZoomError;

impl Resample {
    fn filter(self) -> FilterType {
        match self {
            Resample::Nearest => FilterType::Nearest,
            Resample::Cubic => FilterType::CatmullRom,
            Resample::Lanczos => FilterType::Lanczos3,
        }
    }
}

/// Scale one axis: `round(dim * zoom)`, rounding half away from zero.
fn scale_axis(dim: u32, zoom: f64) -> Option<u32> {
    let scaled = (f64::from(dim) * zoom).round();
    if (1.0..=f64::from(u32::MAX)).contains(&scaled) {
        Some(scaled as u32)
    } else {
        None
    }
}

/// Output dimensions for a zoom, using the same formula on both axes.
///
/// Fails when the factor is not a positive finite number or when either
/// axis would round to zero (or overflow `u32`).
pub fn zoomed_dimensions(width: u32, height: u32, zoom: f64) -> crate::error::Result<(u32, u32)> {
    if !(zoom.is_finite() && zoom > 0.0) {
        return Err(SegZoomError::resample(format!(
            "zoom factor must be a positive finite number, got {zoom}"
        )));
    }
    match (scale_axis(width, zoom), scale_axis(height, zoom)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(SegZoomError::resample(format!(
            "zoom factor {zoom} maps {width}x{height} to an unrepresentable size"
        ))),
    }
}

/// Rescale a grayscale image by `zoom` with the given filter.
pub fn zoom_image(
    image: &GrayImage,
    zoom: f64,
    resample: Resample,
) -> crate::error::Result<GrayImage> {
    let (width, height) = zoomed_dimensions(image.width(), image.height(), zoom)?;
    if (width, height) == image.dimensions() {
        return Ok(image.clone());
    }
    Ok(imageops::resize(image, width, height, resample.filter()))
}
