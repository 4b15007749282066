//! Main parallel processor
//!
//! Contains the ParallelProcessor struct that orchestrates the pipeline:
//! line source -> input queue -> workers -> output queue -> collector.

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::bounded;
use std::io::BufRead;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::classifier::Classifier;

use super::collector::Collector;
use super::coordinator::completion_coordinator;
use super::source::line_source;
use super::types::{Classified, Collected, ParallelConfig, SequencedLine};
use super::worker::worker_thread;

/// Main parallel processor
pub struct ParallelProcessor {
    config: ParallelConfig,
    classifier: Arc<Classifier>,
}

impl ParallelProcessor {
    pub fn new(config: ParallelConfig, classifier: Classifier) -> Self {
        Self {
            config,
            classifier: Arc::new(classifier),
        }
    }

    /// Run the whole pipeline over `reader` and return the collected entries.
    ///
    /// A mid-stream read error does not fail this call: everything read before
    /// it is still classified and collected, and the error is handed back in
    /// `Collected::source_error` for the caller to surface.
    pub fn process<R: BufRead + Send + 'static>(&self, reader: R) -> Result<Collected> {
        let started = Instant::now();
        let num_workers = self.config.num_workers.max(1);

        let (line_sender, line_receiver) = bounded::<SequencedLine>(self.config.queue_capacity);
        let (result_sender, result_receiver) = bounded::<Classified>(self.config.queue_capacity);

        // Start worker threads
        let mut worker_handles = Vec::with_capacity(num_workers);
        for worker_id in 0..num_workers {
            let line_receiver = line_receiver.clone();
            let result_sender = result_sender.clone();
            let classifier = Arc::clone(&self.classifier);

            let handle = thread::Builder::new()
                .name(format!("logsift-worker-{}", worker_id))
                .spawn(move || worker_thread(worker_id, line_receiver, result_sender, classifier))
                .with_context(|| format!("Failed to spawn worker thread {}", worker_id))?;
            worker_handles.push(handle);
        }
        drop(line_receiver);

        // The coordinator takes the last sender we hold; closing the output
        // queue is now its job alone
        let coordinator_handle = thread::Builder::new()
            .name("logsift-coordinator".to_string())
            .spawn(move || completion_coordinator(worker_handles, result_sender))
            .context("Failed to spawn completion coordinator thread")?;

        let collector_handle = {
            let order = self.config.order;
            thread::Builder::new()
                .name("logsift-collector".to_string())
                .spawn(move || Collector::new(order).collect(result_receiver))
                .context("Failed to spawn collector thread")?
        };

        let source_handle = thread::Builder::new()
            .name("logsift-source".to_string())
            .spawn(move || line_source(reader, line_sender))
            .context("Failed to spawn line source thread")?;

        tracing::debug!(
            workers = num_workers,
            queue_capacity = self.config.queue_capacity,
            order = ?self.config.order,
            "pipeline started"
        );

        // Wait for all threads to complete, collector first
        let (entries, mut stats) = collector_handle
            .join()
            .map_err(|_| anyhow!("Collector thread panicked"))?;
        let source_report = source_handle
            .join()
            .map_err(|_| anyhow!("Line source thread panicked"))?;
        let worker_stats = coordinator_handle
            .join()
            .map_err(|_| anyhow!("Completion coordinator thread panicked"))??;

        for ws in &worker_stats {
            tracing::trace!(
                worker_id = ws.worker_id,
                lines_classified = ws.lines_classified,
                lines_matched = ws.lines_matched,
                "worker stats"
            );
        }

        stats.lines_read = source_report.lines_read;
        stats.workers = num_workers;
        stats.finish(started);

        let source_error = source_report.error.map(|e| {
            anyhow::Error::new(e).context(format!(
                "Failed to read input after {} lines",
                source_report.lines_read
            ))
        });

        Ok(Collected {
            entries,
            stats,
            source_error,
        })
    }
}
