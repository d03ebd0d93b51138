//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Speak chat messages aloud through a browser playback page.
#[derive(Debug, Parser)]
#[command(name = "chatvox")]
#[command(about = "Chat-to-speech relay with single-flight playback")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Default log filter for this invocation.
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
