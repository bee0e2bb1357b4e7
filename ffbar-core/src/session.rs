// ============================================================================
// ffbar-core/src/session.rs
// ============================================================================
//
// SESSION: One ffmpeg run with a progress bar
//
// Ties the pieces together for a single invocation: preflight checks on the
// input and output paths, probing the input for its frame count, running
// ffmpeg under the progress loop and summarizing the output file.

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::{FfmpegSpawner, MediaProber};
use crate::invocation::EncoderInvocation;
use crate::media::MediaProperties;
use crate::progress_loop::{LoopOutcome, ProgressLoop};
use crate::render::BarRenderer;
use crate::summary::OutputSummary;
use log::{debug, info, warn};
use std::io::Write;
use std::time::{Duration, Instant};

/// Everything a finished session produced.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Properties of the probed input.
    pub input: MediaProperties,
    pub outcome: LoopOutcome,
    /// `None` when summaries are disabled or the output is not a file.
    pub summary: Option<OutputSummary>,
    pub elapsed: Duration,
}

/// Runs ffmpeg with `invocation`, drawing progress to `out`.
///
/// # Errors
///
/// Fails before ffmpeg starts when the output already exists, the input is
/// missing, a tool is unavailable or the input cannot be probed. Fails after
/// the run with [`CoreError::CommandFailed`] (carrying ffmpeg's last
/// diagnostics) when ffmpeg exits unsuccessfully.
pub fn run_session<S, P, W>(
    config: &CoreConfig,
    invocation: &EncoderInvocation,
    spawner: &S,
    prober: &P,
    out: &mut W,
) -> CoreResult<SessionReport>
where
    S: FfmpegSpawner,
    P: MediaProber,
    W: Write + ?Sized,
{
    config.validate()?;

    // ========================================================================
    // STEP 1: PREFLIGHT
    // ========================================================================

    let output = invocation.output();
    if !invocation.output_is_null_sink() && output.exists() {
        return Err(CoreError::PathError(format!(
            "Output file already exists: {}",
            output.display()
        )));
    }

    let input = invocation.input();
    if invocation.input_is_local_file() && !input.exists() {
        return Err(CoreError::PathError(format!(
            "Input file does not exist: {}",
            input.display()
        )));
    }

    spawner.check_available()?;
    prober.check_available()?;

    // ========================================================================
    // STEP 2: PROBE INPUT
    // ========================================================================

    let input_properties = prober.probe(input)?;
    info!(
        "Input {} has {} frames",
        input.display(),
        input_properties.total_frames
    );

    // ========================================================================
    // STEP 3: ENCODE
    // ========================================================================

    let start = Instant::now();
    let mut process = spawner.spawn(invocation.args())?;
    let mut display = ProgressLoop::new(
        BarRenderer::new(config.bar_width),
        config.poll_interval,
        input_properties.total_frames,
        start,
    );
    let outcome = display.run(&mut process, out)?;
    drop(process);
    let elapsed = start.elapsed();

    if !outcome.exit_status.success() {
        return Err(command_failed_error(
            "ffmpeg",
            outcome.exit_status,
            outcome.diagnostics_text(),
        ));
    }
    info!("ffmpeg finished in {:.1}s", elapsed.as_secs_f64());

    // ========================================================================
    // STEP 4: SUMMARIZE OUTPUT
    // ========================================================================

    let summary = if !config.summarize_output {
        None
    } else if invocation.output_is_null_sink() {
        debug!("Output {} is not a file, skipping summary", output.display());
        None
    } else if !output.exists() {
        warn!("Output {} was not created, skipping summary", output.display());
        None
    } else {
        let properties = prober.probe(output)?;
        Some(OutputSummary::from_properties(output, &properties))
    };

    Ok(SessionReport {
        input: input_properties,
        outcome,
        summary,
        elapsed,
    })
}
