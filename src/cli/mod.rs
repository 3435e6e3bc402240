//! Command-line interface
//!
//! Argument parsing for the `splay_cache` binary and the interactive menu.

mod menu;

use clap::{Parser, Subcommand};

pub use menu::run_menu;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Cache capacity (number of entries); overrides CACHE_CAPACITY
    #[arg(short, long)]
    pub capacity: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Menu-driven session on stdin/stdout (default)
    Interactive,
    /// Two concurrent writers, then print the final contents
    Demo,
    /// Serve the cache over HTTP
    Serve,
}

impl Cli {
    /// Selected command, defaulting to the interactive menu.
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Interactive)
    }
}
