// ffbar-cli/src/main.rs
//
// Entry point of the `ffbar` binary: parses arguments, sets up logging and
// runs ffmpeg under the progress display. Any failure is printed as
// `Error: <message>` on stderr and exits with status 1.

use clap::Parser;
use clap::error::ErrorKind;
use console::{Term, style};
use ffbar_cli::{Cli, init_logging, run_encode};
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    init_logging(cli.verbose);

    if let Err(e) = run_encode(&cli) {
        log::debug!("Run failed: {e:?}");
        let label = style("Error:").red().bold().for_stderr();
        let _ = Term::stderr().write_line(&format!("{label} {e}"));
        process::exit(1);
    }
}
