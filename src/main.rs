//! Propanim - Command-line tool for generating play_animation snippets

use std::process::ExitCode;

use propanim::cli;

fn main() -> ExitCode {
    cli::run()
}
