// segments.json: machine-readable run summary
//
// Lists every written segment with its bounds and the SHA-256 digest of the
// encoded bytes. Contains no timestamps or absolute output paths, so two runs
// over the same input and settings produce the same manifest.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::job::{OutputFormat, Resample, SegmentMode};
use crate::segment::{BoundingBox, Segment};

pub const MANIFEST_FILE_NAME: &str = "segments.json";

#[derive(Debug, Serialize)]
pub struct Manifest {
    pub input: String,
    pub mode: SegmentMode,
    pub padding: u32,
    pub zoom: f64,
    pub resample: Resample,
    pub format: OutputFormat,
    pub segment_count: usize,
    pub segments: Vec<ManifestEntry>,
}

#[derive(Debug, Serialize)]
pub struct ManifestEntry {
    pub index: usize,
    pub file: String,
    pub segment: Segment,
    pub padded: BoundingBox,
    pub width: u32,
    pub height: u32,
    pub sha256: String,
}

impl Manifest {
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn digest_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
