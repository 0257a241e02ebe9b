use clap::Parser;
use tradestats::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
