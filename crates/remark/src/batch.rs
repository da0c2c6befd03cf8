//! Parallel processing of many documents through one pipeline.
//!
//! Each document is still handled by a single worker from parse to render;
//! only the compiled pipeline is shared.

use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// A single document to process.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Document identifier (typically the file path).
    pub id: String,
    /// Markdown source.
    pub source: String,
}

impl BatchInput {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }
}

/// Result for a single document.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Rendered HTML (present on success).
    pub html: Option<String>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics for a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchStats {
    /// Total number of documents processed.
    pub total: u32,
    /// Number of documents rendered successfully.
    pub succeeded: u32,
    /// Number of failed documents.
    pub failed: u32,
    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch processing.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of worker threads. Defaults to rayon's global pool.
    pub max_threads: Option<usize>,
}

/// All results, in input order, plus statistics.
#[derive(Debug, Clone)]
pub struct BatchProcessingResult {
    pub results: Vec<BatchResult>,
    pub stats: BatchStats,
}

/// Renders every input through `pipeline` in parallel.
///
/// A failing document does not stop the batch; its error is recorded in its
/// result and counted in the stats.
pub fn process_batch(
    inputs: Vec<BatchInput>,
    pipeline: &Pipeline,
    options: &BatchOptions,
) -> BatchProcessingResult {
    process_batch_with(inputs, options, |source| pipeline.render(source))
}

/// Runs `render` over every input in parallel, in the same way as
/// [`process_batch`]. Parse errors are tagged with the document id.
pub fn process_batch_with<F>(
    inputs: Vec<BatchInput>,
    options: &BatchOptions,
    render: F,
) -> BatchProcessingResult
where
    F: Fn(&str) -> Result<String, PipelineError> + Sync,
{
    let start = Instant::now();

    let pool = options.max_threads.and_then(|threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| log::warn!("Falling back to the global thread pool: {err}"))
            .ok()
    });

    let total = inputs.len() as u32;
    let succeeded = AtomicU32::new(0);
    let failed = AtomicU32::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        match render(&input.source) {
            Ok(html) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    html: Some(html),
                    error: None,
                }
            }
            Err(err) => {
                failed.fetch_add(1, Ordering::Relaxed);
                let err = err.in_file(input.id.as_str());
                log::warn!("Failed to process document: {err}");
                BatchResult {
                    id: input.id,
                    html: None,
                    error: Some(err.to_string()),
                }
            }
        }
    };

    let results: Vec<BatchResult> = match pool {
        Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
        None => inputs.into_par_iter().map(process_input).collect(),
    };

    BatchProcessingResult {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    }
}
