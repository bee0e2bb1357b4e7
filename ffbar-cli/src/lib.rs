// ffbar-cli/src/lib.rs
//
// Library portion of the ffbar CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::encode::run_encode;
pub use error::{CliErrorContext, CliResult};
pub use logging::init_logging;
