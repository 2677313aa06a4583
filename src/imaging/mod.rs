pub mod binarize;
pub mod crop;
pub mod encode;
pub mod resample;

use std::path::Path;

use image::GrayImage;

use crate::error::SegZoomError;

/// File extensions accepted when a job input is a directory.
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff"];

/// Load an image file and convert it to 8-bit grayscale.
///
/// Any failure (missing file, unknown format, corrupt data) is an
/// `ImageLoadError`; the caller must not produce output for this input.
pub fn load_grayscale(path: &Path) -> crate::error::Result<GrayImage> {
    let decoded = image::open(path)
        .map_err(|e| SegZoomError::image_load(format!("{}: {e}", path.display())))?;
    Ok(decoded.to_luma8())
}

/// Decode an in-memory image and convert it to 8-bit grayscale.
pub fn decode_grayscale(bytes: &[u8]) -> crate::error::Result<GrayImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| SegZoomError::image_load(format!("in-memory image: {e}")))?;
    Ok(decoded.to_luma8())
}

/// Whether `path` has one of the supported raster extensions (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions_ignore_case() {
        assert!(is_supported_image(Path::new("scan.PNG")));
        assert!(is_supported_image(Path::new("dir/page.Jpeg")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("no_extension")));
    }

    #[test]
    fn test_decode_garbage_is_load_error() {
        let err = decode_grayscale(b"not an image").unwrap_err();
        assert!(matches!(err, SegZoomError::ImageLoadError(_)));
    }
}
