//! Configuration structures and constants for the ffbar-core library.
//!
//! Settings come from three layers, later ones winning: the defaults below,
//! `FFBAR_*` environment variables (see [`CoreConfig::from_env`]) and
//! explicit overrides made by the consumer, typically from CLI flags.

mod builder;
pub(crate) mod utils;

use crate::error::{CoreError, CoreResult};
use std::path::PathBuf;
use std::time::Duration;

pub use builder::CoreConfigBuilder;

// Default constants

/// Default number of cells in the progress bar.
pub const DEFAULT_BAR_WIDTH: usize = crate::render::DEFAULT_BAR_WIDTH;

/// Largest accepted bar width. Anything wider will not fit a terminal line.
pub const MAX_BAR_WIDTH: usize = 200;

/// Default time to wait for a status line before checking whether ffmpeg exited.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Environment variable overriding the bar width.
pub const ENV_BAR_WIDTH: &str = "FFBAR_BAR_WIDTH";
/// Environment variable overriding the poll interval, in milliseconds.
pub const ENV_POLL_INTERVAL_MS: &str = "FFBAR_POLL_INTERVAL_MS";
/// Environment variable pointing at the ffmpeg binary.
pub const ENV_FFMPEG_PATH: &str = "FFBAR_FFMPEG_PATH";
/// Environment variable enabling or disabling the output summary.
pub const ENV_SUMMARY: &str = "FFBAR_SUMMARY";

/// Main configuration structure for the ffbar-core library.
///
/// # Examples
///
/// ```rust
/// use ffbar_core::config::CoreConfigBuilder;
/// use std::time::Duration;
///
/// let config = CoreConfigBuilder::new()
///     .bar_width(30)
///     .poll_interval(Duration::from_millis(250))
///     .summarize_output(false)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    /// Number of cells between the brackets of the progress bar
    pub bar_width: usize,

    /// How long to wait for a status line before checking whether ffmpeg exited
    pub poll_interval: Duration,

    /// Explicit ffmpeg binary; when unset the ffmpeg-sidecar lookup is used
    pub ffmpeg_path: Option<PathBuf>,

    /// Whether to probe the output file and build a summary after the encode
    pub summarize_output: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            ffmpeg_path: None,
            summarize_output: true,
        }
    }
}

impl CoreConfig {
    /// Creates a configuration from the defaults overlaid with `FFBAR_*`
    /// environment variables. Unparseable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bar_width: utils::get_env_usize(ENV_BAR_WIDTH, defaults.bar_width),
            poll_interval: Duration::from_millis(utils::get_env_u64(
                ENV_POLL_INTERVAL_MS,
                DEFAULT_POLL_INTERVAL_MS,
            )),
            ffmpeg_path: utils::get_env_path(ENV_FFMPEG_PATH),
            summarize_output: utils::get_env_bool(ENV_SUMMARY, defaults.summarize_output),
        }
    }

    /// Checks that the settings can produce a usable display.
    pub fn validate(&self) -> CoreResult<()> {
        if self.bar_width == 0 {
            return Err(CoreError::Config("bar width must be at least 1".to_string()));
        }
        if self.bar_width > MAX_BAR_WIDTH {
            return Err(CoreError::Config(format!(
                "bar width {} exceeds the maximum of {MAX_BAR_WIDTH}",
                self.bar_width
            )));
        }
        if self.poll_interval.is_zero() {
            return Err(CoreError::Config(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::default();
        assert_eq!(config.bar_width, 20);
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert!(config.ffmpeg_path.is_none());
        assert!(config.summarize_output);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CoreConfig {
            bar_width: 0,
            ..CoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        config.bar_width = MAX_BAR_WIDTH + 1;
        assert!(config.validate().is_err());

        config.bar_width = MAX_BAR_WIDTH;
        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
