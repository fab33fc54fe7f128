use std::process::ExitCode;

use clap::Parser;

use rustouch::cli::{self, CliArgs};
use rustouch::logger;

fn main() -> ExitCode {
    logger::init();
    let args = CliArgs::parse();
    cli::run(args)
}
