//! Core library for logsift
//!
//! A single line source streams the input into a bounded queue, a pool of
//! workers classifies each line against an ordered pattern list, and one
//! collector drops repeated lines before the survivors are written out as a
//! JSON document.
//!
//! ```no_run
//! use logsift::{Sifter, SiftConfig};
//!
//! let config = SiftConfig {
//!     input_path: "app.log".into(),
//!     output_path: "errors.json".into(),
//!     patterns: vec!["ERROR".to_string()],
//!     ..SiftConfig::default()
//! };
//! let stats = Sifter::new(config)?.run()?;
//! eprintln!("{}", stats.format_stats());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod config_file;
pub mod entry;
pub mod logging;
pub mod parallel;
pub mod platform;
pub mod stats;
pub mod tty;
pub mod writer;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub use classifier::Classifier;
pub use config::{OutputFormat, OutputOrder, SiftConfig};
pub use entry::LogEntry;
pub use parallel::{Collected, ParallelConfig, ParallelProcessor};
pub use stats::ProcessingStats;
pub use writer::DocumentWriter;

/// Open the input named by `path`, "-" meaning stdin.
///
/// Runs before any pipeline thread exists, so a missing file aborts the run
/// with nothing started.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    if path.as_os_str() == config::STDIO_PATH {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// A validated configuration with its patterns compiled
pub struct Sifter {
    config: SiftConfig,
    classifier: Classifier,
}

impl Sifter {
    /// Validate `config` and compile its patterns; fails on bad worker
    /// counts, queue sizes or pattern syntax
    pub fn new(config: SiftConfig) -> Result<Self> {
        config.validate()?;
        let classifier = Classifier::new(&config.patterns)?;
        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &SiftConfig {
        &self.config
    }

    /// Run the pipeline over any reader without touching the filesystem
    pub fn sift<R: BufRead + Send + 'static>(&self, reader: R) -> Result<Collected> {
        ParallelProcessor::new(ParallelConfig::from(&self.config), self.classifier.clone())
            .process(reader)
    }

    /// Open the input, run the pipeline and write the document.
    ///
    /// When the input breaks off with a read error, the entries gathered so
    /// far are still written before the error is returned.
    pub fn run(&self) -> Result<ProcessingStats> {
        let reader = open_input(&self.config.input_path)?;
        let collected = self.sift(reader)?;

        writer::write_entries(
            self.config.output_format,
            &self.config.output_path,
            &collected.entries,
        )?;
        tracing::debug!(
            path = %self.config.output_path.display(),
            entries = collected.entries.len(),
            "document written"
        );

        if let Some(err) = collected.source_error {
            return Err(err.context(format!(
                "Input ended early; partial results written to {}",
                self.config.output_path.display()
            )));
        }

        Ok(collected.stats)
    }
}
