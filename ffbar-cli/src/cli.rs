// ffbar-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::Parser;

// --- CLI Argument Definition ---

/// All ffbar options are long-only so they never shadow one of ffmpeg's
/// short options. Everything from the first ffmpeg argument on is passed
/// through verbatim; use `--` if that argument starts with `--`.
#[derive(Parser, Debug)]
#[command(
    name = "ffbar",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "ffbar: ffmpeg with a progress bar",
    long_about = "Runs ffmpeg with the given arguments and replaces its status output with a \
                  progress bar, ETA and a summary of the output file.",
    after_help = "Example:\n  ffbar -i input.mkv -c:v libx265 -crf 22 output.mkv"
)]
pub struct Cli {
    /// Enable debug logging, including ffmpeg's own messages
    #[arg(long)]
    pub verbose: bool,

    /// Width of the progress bar in cells [default: 20]
    #[arg(long, value_name = "CELLS")]
    pub bar_width: Option<usize>,

    /// How long to wait for ffmpeg output before checking whether it exited [default: 100]
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Do not probe and summarize the output file
    #[arg(long)]
    pub no_summary: bool,

    /// Print the output summary as JSON
    #[arg(long, conflicts_with = "no_summary")]
    pub json_summary: bool,

    /// Arguments passed to ffmpeg; must contain `-i <input>` and end with the output file
    #[arg(
        value_name = "FFMPEG_ARGS",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub ffmpeg_args: Vec<String>,
}
