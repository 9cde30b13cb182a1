//! c4izr CLI - Convert draw.io diagrams to C4 system context diagrams

mod cli;
mod container;

use clap::Parser;

fn main() {
    // Logging is initialized in run() once the flags are known
    let cli_args = cli::Cli::parse();

    let mut app = cli::C4izrApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
