//! Common types and utilities shared across modules

use clap::Parser;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Only print warnings and errors"
    )]
    pub quiet: bool,

    #[arg(long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (--verbose for info, twice for debug)")]
    pub verbose: u8,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: warn only (default, or --quiet)
    /// - 1: info (--verbose)
    /// - 2: debug (--verbose --verbose)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
