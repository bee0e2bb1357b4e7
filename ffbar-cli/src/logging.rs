// ============================================================================
// ffbar-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup
//
// Logs always go to stderr so they never interleave with the progress line
// on stdout. Without --verbose only warnings and errors are shown, since any
// log line breaks the in-place bar. RUST_LOG overrides the default filter:
// - RUST_LOG=info: session milestones
// - RUST_LOG=debug or --verbose: details, including ffmpeg's own messages
//   under the `ffmpeg_log` target

use log::LevelFilter;

/// Default log level for the given verbosity flag.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Initializes the global logger. Calling it twice is harmless.
pub fn init_logging(verbose: bool) {
    let result = env_logger::Builder::new()
        .filter_level(default_level(verbose))
        .parse_default_env()
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init();
    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}
