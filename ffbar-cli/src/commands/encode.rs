// ============================================================================
// ffbar-cli/src/commands/encode.rs
// ============================================================================
//
// ENCODE COMMAND: Run ffmpeg with a progress bar
//
// Resolves the configuration (defaults, FFBAR_* environment variables, then
// command-line flags), runs the session against the real ffmpeg and ffprobe
// and prints the summary.

use crate::cli::Cli;
use crate::error::{CliErrorContext, CliResult};
use crate::output::print_summary;
use console::Term;
use ffbar_core::{
    CoreConfig, CoreConfigBuilder, CrateFfprobeExecutor, EncoderInvocation, SidecarSpawner,
    run_session,
};
use std::time::Duration;

/// Builds the effective configuration for this run.
pub fn resolve_config(cli: &Cli) -> CliResult<CoreConfig> {
    let mut builder = CoreConfigBuilder::from_config(CoreConfig::from_env());
    if let Some(width) = cli.bar_width {
        builder = builder.bar_width(width);
    }
    if let Some(ms) = cli.poll_interval_ms {
        builder = builder.poll_interval(Duration::from_millis(ms));
    }
    if cli.no_summary {
        builder = builder.summarize_output(false);
    }
    let config = builder.build();
    config.validate()?;
    Ok(config)
}

pub fn run_encode(cli: &Cli) -> CliResult<()> {
    let config = resolve_config(cli)?;
    log::debug!("Using configuration: {config:?}");

    let invocation = EncoderInvocation::from_args(cli.ffmpeg_args.clone())?;
    let to_stdout = invocation.output_is_stdout();
    let spawner = SidecarSpawner::from_config(&config).forward_stdout(to_stdout);
    let prober = CrateFfprobeExecutor::new();

    // stdout carries the encoded media in this case
    let mut term = if to_stdout {
        log::debug!("Output goes to stdout, drawing progress on stderr");
        Term::stderr()
    } else {
        Term::stdout()
    };
    let report = run_session(&config, &invocation, &spawner, &prober, &mut term)?;
    log::info!(
        "Encoded {} in {:.1}s",
        invocation.output().display(),
        report.elapsed.as_secs_f64()
    );

    if let Some(summary) = &report.summary {
        print_summary(&mut term, summary, cli.json_summary)
            .cli_context("Failed to print the output summary")?;
    }
    Ok(())
}
