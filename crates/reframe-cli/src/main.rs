//! reframe - crop, rotate, flip and resize one image from the command line

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    cli::run()
}
