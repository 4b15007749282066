//! Type definitions for the parallel pipeline
//!
//! Contains the messages that travel on the input and output queues and the
//! pipeline configuration.

use crate::config::{OutputOrder, SiftConfig};
use crate::entry::LogEntry;
use crate::stats::ProcessingStats;

/// Configuration for the parallel pipeline
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    pub num_workers: usize,
    /// Capacity of both the input and the output queue
    pub queue_capacity: usize,
    pub order: OutputOrder,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: crate::config::DEFAULT_WORKER_COUNT,
            queue_capacity: crate::config::DEFAULT_QUEUE_CAPACITY,
            order: OutputOrder::Arrival,
        }
    }
}

impl From<&SiftConfig> for ParallelConfig {
    fn from(config: &SiftConfig) -> Self {
        Self {
            num_workers: config.worker_count,
            queue_capacity: config.queue_capacity,
            order: config.order,
        }
    }
}

/// A line read from the input, tagged with its position
#[derive(Debug, Clone)]
pub struct SequencedLine {
    pub seq: u64,
    pub text: String,
}

/// Worker output for one line; `entry` is None when no pattern matched
#[derive(Debug)]
pub struct Classified {
    pub seq: u64,
    pub entry: Option<LogEntry>,
}

/// What the line source did before it closed the input queue
#[derive(Debug, Default)]
pub struct SourceReport {
    pub lines_read: usize,
    /// Set when a read failed mid-stream and production stopped early
    pub error: Option<std::io::Error>,
}

/// The collector's frozen result for a whole run
#[derive(Debug)]
pub struct Collected {
    pub entries: Vec<LogEntry>,
    pub stats: ProcessingStats,
    /// Read error that cut the input short; entries hold what was read before it
    pub source_error: Option<anyhow::Error>,
}
