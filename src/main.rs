use clap::Parser;
use sortify::cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(message) = run(cli) {
        eprintln!("Error: {}", message);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
