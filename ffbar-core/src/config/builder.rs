// ============================================================================
// ffbar-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig. The builder starts from the plain
// defaults; use `CoreConfigBuilder::from_config(CoreConfig::from_env())` to
// start from the environment instead.

// ---- Standard library imports ----
use std::path::PathBuf;
use std::time::Duration;

// ---- Internal crate imports ----
use super::CoreConfig;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use ffbar_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .bar_width(40)
///     .ffmpeg_path("/opt/ffmpeg/bin/ffmpeg")
///     .build();
/// assert_eq!(config.bar_width, 40);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration, e.g. one read from the environment.
    pub fn from_config(config: CoreConfig) -> Self {
        Self { config }
    }

    /// Sets the number of cells in the progress bar.
    pub fn bar_width(mut self, width: usize) -> Self {
        self.config.bar_width = width;
        self
    }

    /// Sets how long to wait for a status line before checking on ffmpeg.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Sets the ffmpeg binary to run.
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffmpeg_path = Some(path.into());
        self
    }

    /// Sets whether the output file is probed and summarized after the encode.
    pub fn summarize_output(mut self, enable: bool) -> Self {
        self.config.summarize_output = enable;
        self
    }

    /// Builds the CoreConfig instance.
    ///
    /// Call [`CoreConfig::validate`] on the result before using it.
    pub fn build(self) -> CoreConfig {
        self.config
    }
}
