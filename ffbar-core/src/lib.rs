//! Core library for drawing a progress bar over an ffmpeg run.
//!
//! ffmpeg is started with the user's arguments untouched. Its stderr status
//! lines (`frame=… fps=… q=…`) are parsed, turned into a completion
//! percentage against the input's frame count, and redrawn as a single
//! console line with elapsed time, ETA and projected finish time. When ffmpeg
//! is done the output file is probed and summarized.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use ffbar_core::{CoreConfig, CrateFfprobeExecutor, EncoderInvocation, SidecarSpawner, run_session};
//!
//! let config = CoreConfig::from_env();
//! let invocation = EncoderInvocation::from_args(
//!     ["-i", "in.mkv", "-c:v", "libx264", "out.mp4"].map(String::from).to_vec(),
//! )
//! .unwrap();
//!
//! let report = run_session(
//!     &config,
//!     &invocation,
//!     &SidecarSpawner::from_config(&config),
//!     &CrateFfprobeExecutor::new(),
//!     &mut std::io::stdout(),
//! )
//! .unwrap();
//! if let Some(summary) = report.summary {
//!     println!("{summary}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod estimate;
pub mod external;
pub mod invocation;
pub mod media;
pub mod progress_loop;
pub mod render;
pub mod session;
pub mod status;
pub mod summary;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use estimate::{Estimate, estimate};
pub use external::{
    CrateFfprobeExecutor, FfmpegProcess, FfmpegSpawner, MediaProber, SidecarProcess,
    SidecarSpawner, StreamPoll,
};
pub use invocation::EncoderInvocation;
pub use media::MediaProperties;
pub use progress_loop::{LoopOutcome, LoopState, ProgressLoop};
pub use render::BarRenderer;
pub use session::{SessionReport, run_session};
pub use status::{ProgressRecord, StatusStreamReader, parse_progress_record, parse_status_line};
pub use summary::OutputSummary;
pub use utils::{human_readable_size, human_readable_time};
