// Projection-profile line segmentation

use super::LineBand;
use crate::imaging::binarize::BinaryMask;

/// Per-row sum of mask values (the horizontal projection profile).
pub fn projection_profile(mask: &BinaryMask) -> Vec<u64> {
    let width = mask.width() as usize;
    if width == 0 {
        return vec![0; mask.height() as usize];
    }
    mask.as_gray()
        .as_raw()
        .chunks_exact(width)
        .map(|row| row.iter().map(|&v| u64::from(v)).sum())
        .collect()
}

/// Turn a projection profile into row bands.
///
/// A band opens on a 0 -> non-zero transition and closes (exclusive) on the
/// next zero row. A band still open after the last row closes at
/// `profile.len()`, so text touching the bottom edge is kept.
pub fn bands_from_profile(profile: &[u64]) -> Vec<LineBand> {
    let mut bands = Vec::new();
    let mut start: Option<usize> = None;

    for (row, &sum) in profile.iter().enumerate() {
        match (start, sum > 0) {
            (None, true) => start = Some(row),
            (Some(top), false) => {
                bands.push(LineBand {
                    top: top as u32,
                    bottom: row as u32,
                });
                start = None;
            }
            _ => {}
        }
    }

    if let Some(top) = start {
        bands.push(LineBand {
            top: top as u32,
            bottom: profile.len() as u32,
        });
    }

    bands
}

/// Split a mask into text lines, top to bottom.
///
/// A blank mask yields an empty vector.
pub fn segment_lines(mask: &BinaryMask) -> Vec<LineBand> {
    bands_from_profile(&projection_profile(mask))
}
