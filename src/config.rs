use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_INPUT_PATH: &str = "sample.log";
pub const DEFAULT_OUTPUT_PATH: &str = "output.json";
pub const DEFAULT_PATTERNS: [&str; 3] = ["ERROR", "WARNING", "DEBUG"];
pub const DEFAULT_WORKER_COUNT: usize = 4;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Path value meaning stdin for input and stdout for output
pub const STDIO_PATH: &str = "-";

/// Main configuration struct for logsift
#[derive(Debug, Clone)]
pub struct SiftConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Evaluated in order; the first match labels the line
    pub patterns: Vec<String>,
    pub worker_count: usize,
    pub queue_capacity: usize,
    pub order: OutputOrder,
    pub output_format: OutputFormat,
}

/// Order of the final sequence handed to the document writer
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputOrder {
    /// Order in which workers delivered results (nondeterministic)
    #[default]
    Arrival,
    /// Original file order; the first occurrence of a duplicate wins
    Input,
}

/// Output document format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// One JSON object per line
    Jsonl,
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            worker_count: DEFAULT_WORKER_COUNT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            order: OutputOrder::default(),
            output_format: OutputFormat::default(),
        }
    }
}

impl SiftConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let defaults = Self::default();
        Self {
            input_path: cli
                .input
                .clone()
                .map(PathBuf::from)
                .unwrap_or(defaults.input_path),
            output_path: cli
                .output
                .clone()
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            patterns: if cli.patterns.is_empty() {
                defaults.patterns
            } else {
                cli.patterns.clone()
            },
            worker_count: effective_threads(cli.threads),
            queue_capacity: cli.queue_size,
            order: if cli.preserve_order {
                OutputOrder::Input
            } else {
                OutputOrder::Arrival
            },
            output_format: cli.output_format,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            bail!("worker count must be a positive integer");
        }
        if self.queue_capacity == 0 {
            bail!("queue capacity must be a positive integer");
        }
        Ok(())
    }

    pub fn reads_stdin(&self) -> bool {
        self.input_path.as_os_str() == STDIO_PATH
    }

    pub fn writes_stdout(&self) -> bool {
        self.output_path.as_os_str() == STDIO_PATH
    }
}

/// Thread count 0 means one worker per CPU
pub fn effective_threads(threads: usize) -> usize {
    if threads == 0 {
        num_cpus::get()
    } else {
        threads
    }
}

/// Format an error message with the program prefix, colored when stderr is a terminal
pub fn format_error_message(message: &str, use_colors: bool) -> String {
    if use_colors {
        format!("\x1b[1;31mlogsift: Error:\x1b[0m {}", message)
    } else {
        format!("logsift: Error: {}", message)
    }
}

pub fn format_error_message_auto(message: &str) -> String {
    format_error_message(message, crate::tty::should_use_colors_on_stderr())
}
