// ffbar-core/tests/session_tests.rs
#![cfg(unix)]

mod common;

use common::{ScriptedProber, ScriptedProcess, ScriptedSpawner, clip_properties, create_dummy_file};
use ffbar_core::config::CoreConfigBuilder;
use ffbar_core::error::CoreError;
use ffbar_core::invocation::EncoderInvocation;
use ffbar_core::session::run_session;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

const STATUS_LINES: [&str; 3] = [
    "frame=   40 fps= 40 q=24.0 size=     128kB time=00:00:01.60 bitrate= 655.4kbits/s speed=1.6x",
    "frame=   80 fps= 40 q=24.0 size=     256kB time=00:00:03.20 bitrate= 655.4kbits/s speed=1.6x",
    "frame=  100 fps= 40 q=-1.0 Lsize=     320kB time=00:00:04.00 bitrate= 655.4kbits/s speed=1.6x",
];

fn invocation(input: &Path, output: &Path) -> EncoderInvocation {
    EncoderInvocation::from_args(vec![
        "-i".to_string(),
        input.display().to_string(),
        "-c:v".to_string(),
        "libx265".to_string(),
        output.display().to_string(),
    ])
    .expect("valid invocation")
}

fn test_config() -> ffbar_core::CoreConfig {
    CoreConfigBuilder::new()
        .poll_interval(Duration::from_millis(1))
        .build()
}

#[test]
fn test_session_success_with_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "in.mkv");
    let output = dir.path().join("out.mkv");

    let spawner = ScriptedSpawner::new(ScriptedProcess::new(&STATUS_LINES, 0)).creating_output(&output);
    let prober = ScriptedProber::new()
        .with(&input, clip_properties(100))
        .with(&output, clip_properties(100));

    let mut out = Vec::new();
    let report = run_session(&test_config(), &invocation(&input, &output), &spawner, &prober, &mut out)?;

    assert_eq!(report.input.total_frames, 100);
    assert_eq!(report.outcome.renders, 3);
    assert_eq!(prober.probed(), vec![input.clone(), output.clone()]);

    let calls = spawner.received_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0], "-i");
    assert_eq!(calls[0].last(), Some(&output.display().to_string()));

    let summary = report.summary.expect("summary is produced");
    let text = summary.format_summary();
    assert!(text.starts_with(&format!("==> Output file: {}\n", output.display())));
    assert!(text.contains("- Resolution: 1920x1080\n"));
    assert!(text.contains("- Frame rate: 25.00 fps\n"));
    assert!(text.contains("- Duration: 00:00:04\n"));
    assert!(text.contains("- Bitrate: 2.50 Mbps\n"));
    assert!(text.ends_with("- Size: 1.25 MB"));

    let progress = String::from_utf8(out)?;
    assert!(progress.ends_with('\n'));
    assert!(progress.contains("100 / 100 40.00 fps"));
    Ok(())
}

#[test]
fn test_session_refuses_existing_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "in.mkv");
    let output = create_dummy_file(dir.path(), "out.mkv");

    let spawner = ScriptedSpawner::new(ScriptedProcess::new(&STATUS_LINES, 0));
    let prober = ScriptedProber::new().with(&input, clip_properties(100));

    let err = run_session(&test_config(), &invocation(&input, &output), &spawner, &prober, &mut std::io::sink())
        .unwrap_err();
    assert!(matches!(err, CoreError::PathError(ref msg) if msg.starts_with("Output file already exists")));
    assert!(spawner.received_calls().is_empty());
    assert!(prober.probed().is_empty());
    Ok(())
}

#[test]
fn test_session_refuses_missing_input() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("missing.mkv");
    let output = dir.path().join("out.mkv");

    let spawner = ScriptedSpawner::new(ScriptedProcess::new(&STATUS_LINES, 0));
    let err = run_session(&test_config(), &invocation(&input, &output), &spawner, &ScriptedProber::new(), &mut std::io::sink())
        .unwrap_err();
    assert!(matches!(err, CoreError::PathError(ref msg) if msg.starts_with("Input file does not exist")));
    assert!(spawner.received_calls().is_empty());
    Ok(())
}

#[test]
fn test_session_encoder_failure_carries_diagnostics() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "in.mkv");
    let output = dir.path().join("out.mkv");

    let spawner = ScriptedSpawner::new(ScriptedProcess::new(
        &[STATUS_LINES[0], "Unknown encoder 'libx265'"],
        1,
    ));
    let prober = ScriptedProber::new().with(&input, clip_properties(100));

    let mut out = Vec::new();
    let err = run_session(&test_config(), &invocation(&input, &output), &spawner, &prober, &mut out)
        .unwrap_err();
    match err {
        CoreError::CommandFailed(cmd, status, stderr) => {
            assert_eq!(cmd, "ffmpeg");
            assert_eq!(status.code(), Some(1));
            assert_eq!(stderr, "Unknown encoder 'libx265'");
        }
        other => panic!("unexpected error: {other}"),
    }
    // the display is still finished before the error surfaces
    assert!(String::from_utf8(out)?.contains("100.00%"));
    assert_eq!(prober.probed(), vec![input]);
    Ok(())
}

#[test]
fn test_session_probe_failure_stops_before_encode() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "in.mkv");
    let output = dir.path().join("out.mkv");

    let spawner = ScriptedSpawner::new(ScriptedProcess::new(&STATUS_LINES, 0));
    let err = run_session(&test_config(), &invocation(&input, &output), &spawner, &ScriptedProber::new(), &mut std::io::sink())
        .unwrap_err();
    assert!(matches!(err, CoreError::MediaPropertiesUnavailable(_)));
    assert!(spawner.received_calls().is_empty());
    Ok(())
}

#[test]
fn test_session_null_sink_and_disabled_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = create_dummy_file(dir.path(), "in.mkv");
    let prober = ScriptedProber::new().with(&input, clip_properties(100));

    let spawner = ScriptedSpawner::new(ScriptedProcess::new(&STATUS_LINES, 0));
    let report = run_session(
        &test_config(),
        &invocation(&input, Path::new("/dev/null")),
        &spawner,
        &prober,
        &mut std::io::sink(),
    )?;
    assert!(report.summary.is_none());

    let output = dir.path().join("out.mkv");
    let spawner = ScriptedSpawner::new(ScriptedProcess::new(&STATUS_LINES, 0)).creating_output(&output);
    let config = CoreConfigBuilder::from_config(test_config())
        .summarize_output(false)
        .build();
    let report = run_session(&config, &invocation(&input, &output), &spawner, &prober, &mut std::io::sink())?;
    assert!(report.summary.is_none());
    assert_eq!(prober.probed(), vec![input.clone(), input]);
    Ok(())
}

#[test]
fn test_session_rejects_invalid_config() {
    let config = CoreConfigBuilder::new().bar_width(0).build();
    let spawner = ScriptedSpawner::new(ScriptedProcess::new(&[], 0));
    let err = run_session(
        &config,
        &invocation(Path::new("in.mkv"), Path::new("out.mkv")),
        &spawner,
        &ScriptedProber::new(),
        &mut std::io::sink(),
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}
