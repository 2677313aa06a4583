// One job: load image(s) -> render segments -> write to the output directory

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::SegZoomError;
use crate::imaging::{is_supported_image, load_grayscale};
use crate::output::manifest::{MANIFEST_FILE_NAME, Manifest, ManifestEntry, digest_hex};
use crate::output::writer::OutputWriter;
use crate::pipeline::segment_runner::{SegmentConfig, detect_segments, render_segments};

/// Configuration for a single job.
pub struct JobConfig {
    /// An image file, or a directory of images.
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub segment: SegmentConfig,
    /// Write `segments.json` next to the images.
    pub manifest: bool,
}

/// Result of processing one image.
#[derive(Debug)]
pub struct ImageResult {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    /// Written segment files in index order (manifest excluded).
    pub files: Vec<PathBuf>,
}

impl ImageResult {
    pub fn segments_written(&self) -> usize {
        self.files.len()
    }
}

/// An image of a directory job that could not be processed.
///
/// Nothing was written to `output_dir` for it.
#[derive(Debug)]
pub struct ImageFailure {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub error: SegZoomError,
}

/// Result of processing a single job.
#[derive(Debug)]
pub struct JobResult {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    /// One entry per input image, in processing order.
    pub images: Vec<Result<ImageResult, ImageFailure>>,
}

impl JobResult {
    pub fn segments_written(&self) -> usize {
        self.images
            .iter()
            .filter_map(|image| image.as_ref().ok())
            .map(ImageResult::segments_written)
            .sum()
    }

    pub fn failed_images(&self) -> usize {
        self.images.iter().filter(|image| image.is_err()).count()
    }
}

/// Run a single job.
///
/// A file input is written straight into `output_dir`; any failure fails the
/// job. A directory input is expanded to its supported images (sorted by
/// file name), each written into `output_dir/<file stem>/`. A failing image
/// is recorded in [`JobResult::images`] and the remaining images are still
/// processed.
pub fn run_job(config: &JobConfig) -> crate::error::Result<JobResult> {
    let images = if config.input_path.is_dir() {
        let inputs = collect_inputs(&config.input_path)?;
        let mut results = Vec::with_capacity(inputs.len());
        for (input, stem) in inputs {
            let out = config.output_dir.join(stem);
            let result = process_image(&input, &out, &config.segment, config.manifest)
                .map_err(|error| {
                    warn!(input = %input.display(), %error, "skipping image");
                    ImageFailure {
                        input_path: input.clone(),
                        output_dir: out.clone(),
                        error,
                    }
                });
            results.push(result);
        }
        results
    } else {
        vec![Ok(process_image(
            &config.input_path,
            &config.output_dir,
            &config.segment,
            config.manifest,
        )?)]
    };

    Ok(JobResult {
        input_path: config.input_path.clone(),
        output_dir: config.output_dir.clone(),
        images,
    })
}

/// Segment one image file and write the zoomed segments.
///
/// The image is loaded and every segment is rendered before the output
/// directory is created, so a load or render failure leaves nothing behind.
pub fn process_image(
    input_path: &Path,
    output_dir: &Path,
    config: &SegmentConfig,
    write_manifest: bool,
) -> crate::error::Result<ImageResult> {
    let gray = load_grayscale(input_path)?;
    let segments = detect_segments(&gray, config);
    let rendered = render_segments(&gray, &segments, config)?;

    let writer = OutputWriter::open(output_dir)?;
    let mut files = Vec::with_capacity(rendered.len());
    for seg in &rendered {
        files.push(writer.write(&seg.file_name, &seg.bytes)?);
    }

    if write_manifest {
        let manifest = Manifest {
            input: input_path.display().to_string(),
            mode: config.mode,
            padding: config.padding,
            zoom: config.zoom,
            resample: config.resample,
            format: config.format,
            segment_count: rendered.len(),
            segments: rendered
                .iter()
                .map(|seg| ManifestEntry {
                    index: seg.index,
                    file: seg.file_name.clone(),
                    segment: seg.segment,
                    padded: seg.padded,
                    width: seg.width,
                    height: seg.height,
                    sha256: digest_hex(&seg.bytes),
                })
                .collect(),
        };
        writer.write(MANIFEST_FILE_NAME, manifest.to_json()?.as_bytes())?;
    }

    if rendered.is_empty() {
        warn!(input = %input_path.display(), "no segments found");
    } else {
        info!(
            input = %input_path.display(),
            output = %output_dir.display(),
            segments = rendered.len(),
            "segmented image"
        );
    }

    Ok(ImageResult {
        input_path: input_path.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        files,
    })
}

/// Supported images directly inside `dir`, sorted by file name, paired with
/// their file stems. Stems must be unique since each names an output subdir.
fn collect_inputs(dir: &Path) -> crate::error::Result<Vec<(PathBuf, String)>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_supported_image(p))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(SegZoomError::config(format!(
            "no supported images found in {}",
            dir.display()
        )));
    }

    let mut seen = HashSet::new();
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                SegZoomError::config(format!("file name is not valid UTF-8: {}", path.display()))
            })?
            .to_string();
        if !seen.insert(stem.clone()) {
            return Err(SegZoomError::config(format!(
                "two inputs in {} share the file stem '{stem}'",
                dir.display()
            )));
        }
        inputs.push((path, stem));
    }
    Ok(inputs)
}
