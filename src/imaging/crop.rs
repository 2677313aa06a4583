use image::GrayImage;
use image::imageops;

use crate::segment::BoundingBox;

/// Grow `region` by `padding` on every side, clamped to `[0, width] x [0, height]`.
///
/// Never fails: coordinates that would fall outside the page are clamped.
pub fn pad_region(region: BoundingBox, padding: u32, width: u32, height: u32) -> BoundingBox {
    BoundingBox {
        x1: region.x1.saturating_sub(padding).min(width),
        y1: region.y1.saturating_sub(padding).min(height),
        x2: region.x2.saturating_add(padding).min(width),
        y2: region.y2.saturating_add(padding).min(height),
    }
}

/// Copy the pixels of `region` out of the source grayscale page.
pub fn crop_gray(image: &GrayImage, region: BoundingBox) -> GrayImage {
    imageops::crop_imm(image, region.x1, region.y1, region.width(), region.height()).to_image()
}
