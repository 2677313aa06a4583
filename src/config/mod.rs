pub mod job;
pub mod merged;
pub mod settings;

use std::path::Path;

use settings::Settings;
use tracing::debug;

/// ジョブファイルと並べて置く設定ファイル名。
pub const SETTINGS_FILE_NAME: &str = "settings.yaml";

/// ジョブファイルと同じディレクトリにある `settings.yaml` を読み込む。
///
/// `mode` / `threshold` / `padding` / `zoom` などの既定値と、ジョブ間で共有する
/// `parallel_workers` をここで決める。ファイルが無ければ `Settings::default()`
/// (行モード・閾値128・余白5・20倍・PNG) を返す。
pub fn load_settings_for_job(job_file_path: &Path) -> crate::error::Result<Settings> {
    let settings_path = job_file_path
        .parent()
        .map(|dir| dir.join(SETTINGS_FILE_NAME))
        .ok_or_else(|| {
            crate::error::SegZoomError::config(format!(
                "Cannot determine directory of job file {}",
                job_file_path.display()
            ))
        })?;

    if !settings_path.is_file() {
        debug!(path = %settings_path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    Settings::from_file(&settings_path)
}
