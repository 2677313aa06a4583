// Runs every job, optionally on a worker pool

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::debug;

use crate::error::SegZoomError;
use crate::pipeline::job_runner::{JobConfig, JobResult, run_job};

/// Run multiple jobs, collecting results in job order.
///
/// One job failure does NOT prevent other jobs from running.
/// `parallel_workers == 1` runs jobs sequentially on the calling thread;
/// `0` lets rayon choose the pool size. Each job itself is single-threaded.
///
/// Fails up front, before any job runs, if two jobs share an output directory.
pub fn run_all_jobs(
    jobs: &[JobConfig],
    parallel_workers: usize,
) -> crate::error::Result<Vec<crate::error::Result<JobResult>>> {
    check_distinct_outputs(jobs)?;

    if parallel_workers == 1 || jobs.len() <= 1 {
        return Ok(jobs.iter().map(run_job).collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel_workers)
        .build()
        .map_err(|e| SegZoomError::config(format!("failed to build worker pool: {e}")))?;
    debug!(threads = pool.current_num_threads(), jobs = jobs.len(), "running jobs in parallel");

    Ok(pool.install(|| jobs.par_iter().map(run_job).collect()))
}

/// Segment numbering is only unique within one output directory.
fn check_distinct_outputs(jobs: &[JobConfig]) -> crate::error::Result<()> {
    let mut seen = HashSet::new();
    for job in jobs {
        if !seen.insert(job.output_dir.as_path()) {
            return Err(SegZoomError::config(format!(
                "multiple jobs write to the same output directory: {}",
                job.output_dir.display()
            )));
        }
    }
    Ok(())
}
