//! Completion coordinator
//!
//! Bridges the end of the worker pool to the collector: once every worker has
//! been joined, the last output-queue sender is dropped and the collector's
//! drain loop ends.

use anyhow::{bail, Result};
use crossbeam_channel::Sender;
use std::thread::JoinHandle;

use crate::stats::WorkerStats;

use super::types::Classified;

/// Join all workers, then close the output queue.
///
/// This is the only place the orchestrator's output sender is dropped.
/// Workers hold clones, so the queue stays open until the last of them has
/// exited. A panicked worker does not stop the join of the others, and the
/// queue is closed before the panic is reported.
pub(crate) fn completion_coordinator(
    worker_handles: Vec<JoinHandle<WorkerStats>>,
    result_sender: Sender<Classified>,
) -> Result<Vec<WorkerStats>> {
    let mut worker_stats = Vec::with_capacity(worker_handles.len());
    let mut panicked = Vec::new();

    for (idx, handle) in worker_handles.into_iter().enumerate() {
        match handle.join() {
            Ok(stats) => worker_stats.push(stats),
            Err(_) => panicked.push(idx),
        }
    }

    drop(result_sender);
    tracing::debug!(workers = worker_stats.len(), "all workers joined, output queue closed");

    if !panicked.is_empty() {
        bail!("Worker thread(s) {:?} panicked", panicked);
    }
    Ok(worker_stats)
}
