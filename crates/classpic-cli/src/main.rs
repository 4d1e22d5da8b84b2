//! Classpic CLI - render plain-text class diagrams to PNG images

mod cli;

use clap::Parser;

fn main() {
    let args = cli::Cli::parse();

    if let Err(e) = cli::run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
