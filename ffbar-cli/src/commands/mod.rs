//! Command implementations for the CLI.

/// Runs ffmpeg under the progress display.
pub mod encode;
