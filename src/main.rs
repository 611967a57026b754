mod cli;
mod config;
mod logging;
mod neighbors_cmd;
mod repl;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Repl(args) => repl::run(args),
        Command::Neighbors(args) => neighbors_cmd::run(args),
    }
}
