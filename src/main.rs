use clap::Parser;
use fourd::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
