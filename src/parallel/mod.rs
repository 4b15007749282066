//! Parallel classification pipeline for logsift
//!
//! # Module Structure
//!
//! - `types`: Queue messages, configuration and the collected result
//! - `source`: Line source thread feeding the bounded input queue
//! - `worker`: Worker thread classifying lines
//! - `coordinator`: Joins the workers and closes the output queue
//! - `collector`: Deduplicating collector that builds the final sequence
//! - `processor`: Main ParallelProcessor orchestration

mod collector;
mod coordinator;
mod processor;
mod source;
mod types;
mod worker;

// Re-export public types
pub use collector::Collector;
pub use processor::ParallelProcessor;
pub use types::{Classified, Collected, ParallelConfig, SequencedLine};
