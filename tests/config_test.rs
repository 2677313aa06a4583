// 設定ファイル解析テスト

use std::path::Path;

use segment_zoom::config::job::{JobFile, OutputFormat, Resample, SegmentMode, parse_zoom_factor};
use segment_zoom::config::load_settings_for_job;
use segment_zoom::config::merged::MergedConfig;
use segment_zoom::config::settings::Settings;
use segment_zoom::error::SegZoomError;

// ============================================================
// 1. ズーム倍率パーサ
// ============================================================

#[test]
fn test_parse_zoom_factor_integer() {
    assert_eq!(parse_zoom_factor("20").expect("should parse"), 20.0);
}

#[test]
fn test_parse_zoom_factor_fractional_with_suffix() {
    assert_eq!(parse_zoom_factor("2.5x").expect("should parse"), 2.5);
    assert_eq!(parse_zoom_factor(" 0.5X ").expect("should parse"), 0.5);
}

#[test]
fn test_parse_zoom_factor_invalid_text() {
    assert!(parse_zoom_factor("abc").is_err());
    assert!(parse_zoom_factor("").is_err());
    assert!(parse_zoom_factor("x").is_err());
}

#[test]
fn test_parse_zoom_factor_rejects_non_positive_and_non_finite() {
    assert!(parse_zoom_factor("0").is_err());
    assert!(parse_zoom_factor("-2").is_err());
    assert!(parse_zoom_factor("inf").is_err());
    assert!(parse_zoom_factor("NaN").is_err());
}

// ============================================================
// 2. Settings 構造体のデシリアライズ
// ============================================================

#[test]
fn test_settings_full_yaml() {
    let yaml = r#"
mode: phrase
threshold: 100
merge_proximity: 20
padding: 10
zoom: 3
resample: cubic
format: jpeg
jpeg_quality: 75
parallel_workers: 4
manifest: false
"#;
    let settings = Settings::from_yaml(yaml).expect("should parse full YAML");
    assert_eq!(settings.mode, SegmentMode::Phrase);
    assert_eq!(settings.threshold, 100);
    assert_eq!(settings.merge_proximity, 20);
    assert_eq!(settings.padding, 10);
    assert_eq!(settings.zoom, 3.0);
    assert_eq!(settings.resample, Resample::Cubic);
    assert_eq!(settings.format, OutputFormat::Jpeg);
    assert_eq!(settings.jpeg_quality, 75);
    assert_eq!(settings.parallel_workers, 4);
    assert!(!settings.manifest);
}

#[test]
fn test_settings_empty_yaml() {
    let settings = Settings::from_yaml("{}").expect("should use defaults for empty YAML");
    assert_eq!(settings.mode, SegmentMode::Line);
    assert_eq!(settings.threshold, 128);
    assert_eq!(settings.merge_proximity, 15);
    assert_eq!(settings.padding, 5);
    assert_eq!(settings.zoom, 20.0);
    assert_eq!(settings.resample, Resample::Nearest);
    assert_eq!(settings.format, OutputFormat::Png);
    assert_eq!(settings.jpeg_quality, 90);
    assert_eq!(settings.parallel_workers, 1);
    assert!(settings.manifest);
}

#[test]
fn test_settings_partial_yaml() {
    let yaml = r#"
padding: 8
"#;
    let settings = Settings::from_yaml(yaml).expect("should fill missing with defaults");
    assert_eq!(settings.padding, 8);
    assert_eq!(settings.mode, SegmentMode::Line);
    assert_eq!(settings.zoom, 20.0);
}

#[test]
fn test_settings_zoom_as_string() {
    let settings = Settings::from_yaml("zoom: \"2.5x\"").expect("should parse zoom string");
    assert_eq!(settings.zoom, 2.5);

    let settings = Settings::from_yaml("zoom: 3x").expect("should parse bare zoom string");
    assert_eq!(settings.zoom, 3.0);
}

#[test]
fn test_settings_rejects_zero_zoom() {
    assert!(Settings::from_yaml("zoom: 0").is_err());
}

#[test]
fn test_settings_rejects_unknown_mode() {
    assert!(Settings::from_yaml("mode: diagonal").is_err());
}

#[test]
fn test_settings_rejects_invalid_yaml() {
    assert!(Settings::from_yaml("this is not: valid: yaml: {{{{").is_err());
}

// ============================================================
// 3. Job 構造体のデシリアライズ
// ============================================================

#[test]
fn test_job_required_fields_only() {
    let yaml = r#"
jobs:
  - input: "page.png"
    output: "out/page"
"#;
    let job_file: JobFile = serde_yml::from_str(yaml).expect("should parse required fields");
    assert_eq!(job_file.jobs.len(), 1);
    let job = &job_file.jobs[0];
    assert_eq!(job.input, "page.png");
    assert_eq!(job.output, "out/page");
    assert!(job.mode.is_none());
    assert!(job.padding.is_none());
    assert!(job.zoom.is_none());
    assert!(job.resample.is_none());
    assert!(job.manifest.is_none());
}

#[test]
fn test_job_all_fields() {
    let yaml = r#"
jobs:
  - input: "scans"
    output: "out"
    mode: whole
    padding: 0
    zoom: "0.5x"
    resample: lanczos
    threshold: 90
    merge_proximity: 4
    format: png
    jpeg_quality: 50
    manifest: false
"#;
    let job_file: JobFile = serde_yml::from_str(yaml).expect("should parse all fields");
    let job = &job_file.jobs[0];
    assert_eq!(job.mode, Some(SegmentMode::Whole));
    assert_eq!(job.padding, Some(0));
    assert_eq!(job.zoom, Some(0.5));
    assert_eq!(job.resample, Some(Resample::Lanczos));
    assert_eq!(job.threshold, Some(90));
    assert_eq!(job.merge_proximity, Some(4));
    assert_eq!(job.format, Some(OutputFormat::Png));
    assert_eq!(job.jpeg_quality, Some(50));
    assert_eq!(job.manifest, Some(false));
}

#[test]
fn test_job_invalid_zoom_rejected() {
    let yaml = r#"
jobs:
  - input: "a.png"
    output: "out"
    zoom: "-3x"
"#;
    let result: Result<JobFile, _> = serde_yml::from_str(yaml);
    assert!(result.is_err());
}

#[test]
fn test_job_missing_output_rejected() {
    let yaml = r#"
jobs:
  - input: "a.png"
"#;
    let result: Result<JobFile, _> = serde_yml::from_str(yaml);
    assert!(result.is_err());
}

// ============================================================
// 4. MergedConfig のマージと検証
// ============================================================

fn single_job(yaml: &str) -> segment_zoom::config::job::Job {
    let job_file: JobFile = serde_yml::from_str(yaml).expect("job yaml");
    job_file.jobs.into_iter().next().expect("one job")
}

#[test]
fn test_merged_config_uses_settings_when_job_silent() {
    let settings = Settings::default();
    let job = single_job("jobs:\n  - input: a.png\n    output: out\n");
    let merged = MergedConfig::new(&settings, &job);
    assert_eq!(merged.mode, SegmentMode::Line);
    assert_eq!(merged.padding, 5);
    assert_eq!(merged.zoom, 20.0);
    assert_eq!(merged.parallel_workers, 1);
    assert!(merged.manifest);
}

#[test]
fn test_merged_config_job_overrides_settings() {
    let settings = Settings::from_yaml("padding: 9\nzoom: 4\nresample: cubic").expect("settings");
    let job = single_job(
        "jobs:\n  - input: a.png\n    output: out\n    padding: 2\n    mode: phrase\n",
    );
    let merged = MergedConfig::new(&settings, &job);
    assert_eq!(merged.padding, 2);
    assert_eq!(merged.mode, SegmentMode::Phrase);
    assert_eq!(merged.zoom, 4.0);
    assert_eq!(merged.resample, Resample::Cubic);
}

#[test]
fn test_merged_config_validate_jpeg_quality() {
    let settings = Settings::default();
    let job = single_job(
        "jobs:\n  - input: a.png\n    output: out\n    format: jpeg\n    jpeg_quality: 0\n",
    );
    assert!(MergedConfig::new(&settings, &job).validate().is_err());

    // quality is irrelevant for PNG output
    let job = single_job("jobs:\n  - input: a.png\n    output: out\n    jpeg_quality: 0\n");
    assert!(MergedConfig::new(&settings, &job).validate().is_ok());
}

// ============================================================
// 5. settings.yaml の自動検出
// ============================================================

#[test]
fn test_load_settings_for_job_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("settings.yaml"), "padding: 12\n").expect("write settings");
    let job_path = dir.path().join("jobs.yaml");

    let settings = load_settings_for_job(&job_path).expect("should load settings");
    assert_eq!(settings.padding, 12);
}

#[test]
fn test_load_settings_for_job_missing_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let job_path = dir.path().join("jobs.yaml");

    let settings = load_settings_for_job(&job_path).expect("should fall back to defaults");
    assert_eq!(settings.padding, 5);
}

#[test]
fn test_load_settings_for_job_invalid_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("settings.yaml"), "zoom: [1, 2]\n").expect("write settings");

    let result = load_settings_for_job(&dir.path().join("jobs.yaml"));
    assert!(result.is_err());
}

#[test]
fn test_settings_from_file_not_found() {
    let result = Settings::from_file(Path::new("/nonexistent/path/settings.yaml"));
    assert!(result.is_err());
}

#[test]
fn test_load_settings_for_job_ignores_settings_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("settings.yaml")).expect("mkdir");

    let settings =
        load_settings_for_job(&dir.path().join("jobs.yaml")).expect("should fall back to defaults");
    assert_eq!(settings.zoom, 20.0);
}

#[test]
fn test_load_settings_for_job_without_parent() {
    let result = load_settings_for_job(Path::new("/"));
    assert!(matches!(result, Err(SegZoomError::ConfigError(_))));
}
