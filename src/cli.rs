// CLI structure - contains all command-line arguments and options

use clap::Parser;

use crate::config::{OutputFormat, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT};

#[derive(Parser, Debug)]
#[command(name = "logsift")]
#[command(about = "Classify log lines against patterns in parallel and save unique matches as JSON")]
#[command(
    long_about = "Classify log lines against patterns in parallel and save unique matches as JSON\n\nEach line is tested against the patterns in order; the first match labels it.\nLines matching no pattern are dropped, and repeated lines are kept once.\n\nCOMMON EXAMPLES:\n  logsift app.log -o errors.json\n  logsift app.log -p FATAL -p ERROR --threads 8 --stats\n  cat app.log | logsift - -o - -F jsonl --preserve-order"
)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Input log file ("-" for stdin) [default: sample.log]
    pub input: Option<String>,

    /// Output document path ("-" for stdout) [default: output.json]
    #[arg(short = 'o', long = "output", help_heading = "Output Options")]
    pub output: Option<String>,

    /// Output document format
    #[arg(
        short = 'F',
        long = "output-format",
        value_enum,
        default_value = "json",
        help_heading = "Output Options"
    )]
    pub output_format: OutputFormat,

    /// Keep entries in input file order instead of worker arrival order
    #[arg(long = "preserve-order", help_heading = "Output Options")]
    pub preserve_order: bool,

    /// Pattern (regex) to classify lines with; repeat for more, earlier wins [default: ERROR WARNING DEBUG]
    #[arg(
        short = 'p',
        long = "pattern",
        action = clap::ArgAction::Append,
        help_heading = "Matching Options"
    )]
    pub patterns: Vec<String>,

    /// Number of worker threads (0 = one per CPU)
    #[arg(
        short = 't',
        long = "threads",
        default_value_t = DEFAULT_WORKER_COUNT,
        help_heading = "Performance Options"
    )]
    pub threads: usize,

    /// Capacity of the input and output queues
    #[arg(
        long = "queue-size",
        default_value_t = DEFAULT_QUEUE_CAPACITY,
        help_heading = "Performance Options"
    )]
    pub queue_size: usize,

    /// Print processing statistics to stderr
    #[arg(short = 's', long = "stats", help_heading = "Display Options")]
    pub stats: bool,

    /// Increase diagnostic output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, help_heading = "Display Options")]
    pub verbose: u8,

    /// Read configuration from this file instead of the default locations
    #[arg(long = "config-file", help_heading = "Configuration Options")]
    pub config_file: Option<String>,

    /// Ignore all configuration files
    #[arg(long = "ignore-config", help_heading = "Configuration Options")]
    pub ignore_config: bool,
}
