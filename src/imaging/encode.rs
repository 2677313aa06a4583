// image crate: grayscale segment -> PNG / JPEG bytes

use std::io::Cursor;

use image::GrayImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;

use crate::config::job::OutputFormat;
use crate::error::SegZoomError;

/// Largest width or height a baseline JPEG header can store.
pub const JPEG_MAX_DIMENSION: u32 = u16::MAX as u32;

/// Reject sizes the JPEG encoder cannot represent.
///
/// Called before zooming too, so an oversized segment fails without
/// allocating the enlarged image.
pub fn check_jpeg_dimensions(width: u32, height: u32) -> crate::error::Result<()> {
    if width > JPEG_MAX_DIMENSION || height > JPEG_MAX_DIMENSION {
        return Err(SegZoomError::image_encode(format!(
            "zoomed segment is {width}x{height}, JPEG allows at most \
             {JPEG_MAX_DIMENSION} pixels per side (lower zoom or use png)"
        )));
    }
    Ok(())
}

/// Encode a grayscale image in the requested format.
///
/// `quality` is only used for JPEG and must be 1-100.
pub fn encode_gray(
    image: &GrayImage,
    format: OutputFormat,
    quality: u8,
) -> crate::error::Result<Vec<u8>> {
    if image.width() == 0 || image.height() == 0 {
        return Err(SegZoomError::image_encode(format!(
            "cannot encode empty {}x{} image",
            image.width(),
            image.height()
        )));
    }
    match format {
        OutputFormat::Png => encode_gray_to_png(image),
        OutputFormat::Jpeg => encode_gray_to_jpeg(image, quality),
    }
}

/// Encode to lossless PNG.
pub fn encode_gray_to_png(image: &GrayImage) -> crate::error::Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_with_encoder(PngEncoder::new(&mut buf))?;
    Ok(buf.into_inner())
}

/// Encode to baseline JPEG at the given quality (1 = worst, 100 = best).
pub fn encode_gray_to_jpeg(image: &GrayImage, quality: u8) -> crate::error::Result<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(SegZoomError::image_encode(format!(
            "JPEG quality must be 1-100, got {}",
            quality
        )));
    }

    check_jpeg_dimensions(image.width(), image.height())?;

    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    image.write_with_encoder(encoder)?;

    Ok(buf.into_inner())
}
