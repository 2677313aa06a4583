use std::path::{Path, PathBuf};
use std::process::ExitCode;

use segment_zoom::config::job::JobFile;
use segment_zoom::config::merged::MergedConfig;
use segment_zoom::config::{self};
use segment_zoom::pipeline::job_runner::JobConfig;
use segment_zoom::pipeline::orchestrator::run_all_jobs;
use segment_zoom::pipeline::segment_runner::SegmentConfig;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: segment_zoom <jobs.yaml>...");
        eprintln!("  Split page images into zoomed line or phrase segments.");
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("segment_zoom {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let mut job_configs: Vec<JobConfig> = Vec::new();
    // Worker count comes from the first job file's settings.
    let mut parallel_workers: Option<usize> = None;

    for job_file_arg in &args {
        let job_file_path = Path::new(job_file_arg);

        // Load settings from the same directory as the job file.
        let settings = match config::load_settings_for_job(job_file_path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("ERROR: Failed to load settings for {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };
        parallel_workers.get_or_insert(settings.parallel_workers);

        let yaml_content = match std::fs::read_to_string(job_file_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("ERROR: Failed to read job file {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        let job_file: JobFile = match serde_yml::from_str(&yaml_content) {
            Ok(jf) => jf,
            Err(e) => {
                eprintln!("ERROR: Failed to parse job file {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        // Resolve job file directory for relative paths.
        let job_dir = job_file_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        for job in &job_file.jobs {
            let merged = MergedConfig::new(&settings, job);
            if let Err(e) = merged.validate() {
                eprintln!("ERROR: Invalid job for {}: {e}", job.input);
                return ExitCode::FAILURE;
            }

            job_configs.push(JobConfig {
                input_path: resolve_path(&job_dir, &job.input),
                output_dir: resolve_path(&job_dir, &job.output),
                segment: SegmentConfig::from(&merged),
                manifest: merged.manifest,
            });
        }
    }

    let results = match run_all_jobs(&job_configs, parallel_workers.unwrap_or(1)) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut has_error = false;
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(job_result) => {
                for image in &job_result.images {
                    let image = match image {
                        Ok(image) => image,
                        Err(failure) => {
                            eprintln!(
                                "ERROR: {} -> {}: {}",
                                failure.input_path.display(),
                                failure.output_dir.display(),
                                failure.error
                            );
                            has_error = true;
                            continue;
                        }
                    };
                    let count = image.segments_written();
                    let summary = if count == 0 {
                        "no segments found".to_string()
                    } else if count == 1 {
                        "1 segment".to_string()
                    } else {
                        format!("{count} segments")
                    };
                    eprintln!(
                        "OK: {} -> {} ({summary})",
                        image.input_path.display(),
                        image.output_dir.display(),
                    );
                }
            }
            Err(e) => {
                eprintln!(
                    "ERROR: {} -> {}: {e}",
                    job_configs[i].input_path.display(),
                    job_configs[i].output_dir.display()
                );
                has_error = true;
            }
        }
    }

    if has_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Resolve a potentially relative path against a base directory.
/// If the path is already absolute, return it as-is.
fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}
