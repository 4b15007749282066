// Structured diagnostics for pipeline internals.
//
// Activation priority: RUST_LOG > -v/-vv > default "warn".
// Output goes to stderr so stdout stays free for `-o -`.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Filter directive for a `-v` count
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => DEFAULT_LOG_LEVEL,
        1 => "debug",
        _ => "trace",
    }
}

/// Initialise the logging subsystem. Safe to call more than once; later
/// calls leave the first subscriber in place.
pub fn init(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level_for_verbosity(verbose))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .with_ansi(crate::tty::should_use_colors_on_stderr())
        .compact()
        .try_init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialised");
}
