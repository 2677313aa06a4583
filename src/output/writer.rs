use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::job::{OutputFormat, SegmentMode};
use crate::error::SegZoomError;

/// File name of the `index`-th segment: `{prefix}_{index}_zoomed.{ext}`.
pub fn segment_file_name(mode: SegmentMode, index: usize, format: OutputFormat) -> String {
    format!(
        "{}_{}_zoomed.{}",
        mode.file_prefix(),
        index,
        format.extension()
    )
}

/// Writes segment files into one output directory.
///
/// The directory is created when the writer is opened; file names come from
/// [`segment_file_name`], so indices keep them unique within a run.
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    /// Create `dir` (and parents) if absent. Failure is fatal.
    pub fn open(dir: impl AsRef<Path>) -> crate::error::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            SegZoomError::output(format!(
                "failed to create output directory {}: {e}",
                dir.display()
            ))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` to `<dir>/<file_name>` and return the full path.
    pub fn write(&self, file_name: &str, bytes: &[u8]) -> crate::error::Result<PathBuf> {
        let path = self.dir.join(file_name);
        fs::write(&path, bytes).map_err(|e| {
            SegZoomError::output(format!("failed to write {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "wrote segment");
        Ok(path)
    }
}
