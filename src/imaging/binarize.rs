// Inverted global threshold: dark ink -> 255, light paper -> 0

use image::{GrayImage, Luma};

/// Intensity at or below which a pixel counts as ink.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Mask value for ink pixels.
pub const INK: u8 = 255;

/// Single-channel mask where ink pixels are [`INK`] and background is 0.
///
/// Only constructed through [`binarize`] or [`BinaryMask::from_fn`], so every
/// pixel is guaranteed to be either 0 or 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    image: GrayImage,
}

impl BinaryMask {
    /// Build a mask from a per-pixel ink predicate.
    pub fn from_fn(width: u32, height: u32, mut is_ink: impl FnMut(u32, u32) -> bool) -> Self {
        let image = GrayImage::from_fn(width, height, |x, y| {
            Luma([if is_ink(x, y) { INK } else { 0 }])
        });
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y).0[0] == INK
    }

    /// The underlying 0/255 image, for algorithms that operate on `GrayImage`.
    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }
}

/// Binarize a grayscale page with an inverted threshold.
///
/// Pixels with intensity `> threshold` become background (0); pixels
/// `<= threshold` become ink (255). Text is assumed darker than the paper.
pub fn binarize(gray: &GrayImage, threshold: u8) -> BinaryMask {
    let mut image = gray.clone();
    for pixel in image.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > threshold { 0 } else { INK };
    }
    BinaryMask { image }
}
