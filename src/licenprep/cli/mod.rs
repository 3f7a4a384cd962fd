//! # CLI
//!
//! One possible client for the library. This is the only place that knows
//! about stdout, stdin and exit codes; everything else goes through
//! [`licenprep::api::LicenPrepApi`].
//!
//! Running `licenprep` with no subcommand shows the dashboard.
//!
//! ## Module Structure
//!
//! - `args`: clap definitions
//! - `commands`: context wiring and one handler per command
//! - `practice`: the interactive practice loop
//! - `print`: terminal rendering

mod args;
mod commands;
mod practice;
mod print;

use args::Cli;
use clap::Parser;
use licenprep::error::Result;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    licenprep::logging::init(cli.verbose);
    commands::dispatch(cli)
}
