use anyhow::Result;
use clap::Parser;

use logsift::cli::Cli;
use logsift::config::{format_error_message_auto, SiftConfig};
use logsift::config_file::{extract_config_file_arg, ConfigFile};
use logsift::platform::ExitCode;
use logsift::{logging, Sifter};

fn main() {
    let cli = process_args_with_config();
    logging::init(cli.verbose);

    let config = SiftConfig::from_cli(&cli);

    // Bad worker counts, queue sizes and pattern syntax are usage errors
    let sifter = match Sifter::new(config) {
        Ok(sifter) => sifter,
        Err(e) => {
            eprintln!("{}", format_error_message_auto(&format!("{:#}", e)));
            ExitCode::InvalidUsage.exit();
        }
    };

    match sifter.run() {
        Ok(stats) => {
            if cli.stats {
                eprintln!("{}", stats.format_stats());
            }
            tracing::info!(
                lines_read = stats.lines_read,
                entries = stats.entries_output,
                duplicates = stats.duplicates,
                "run complete"
            );
            if !sifter.config().writes_stdout() {
                eprintln!(
                    "Processing completed. Results saved to {}",
                    sifter.config().output_path.display()
                );
            }
            ExitCode::Success.exit();
        }
        Err(e) => {
            eprintln!("{}", format_error_message_auto(&format!("{:#}", e)));
            ExitCode::GeneralError.exit();
        }
    }
}

/// Merge config-file defaults into the raw arguments, then parse them
fn process_args_with_config() -> Cli {
    let raw_args: Vec<String> = std::env::args().collect();

    let args = if raw_args.iter().any(|arg| arg == "--ignore-config") {
        raw_args
    } else {
        match load_and_apply_config(raw_args) {
            Ok(args) => args,
            Err(e) => {
                eprintln!("{}", format_error_message_auto(&format!("{:#}", e)));
                ExitCode::InvalidUsage.exit();
            }
        }
    };

    // clap prints its own message and exits with 2 on bad arguments
    Cli::parse_from(args)
}

fn load_and_apply_config(raw_args: Vec<String>) -> Result<Vec<String>> {
    let custom_path = extract_config_file_arg(&raw_args);
    let config_file = ConfigFile::load_with_custom_path(custom_path.as_deref())?;
    config_file.process_args(raw_args)
}
