//! Subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Print text as the synthesis engine would receive it
    Normalize {
        /// Text to normalize
        text: String,
    },

    /// List selectable voices
    Voices,

    /// Print the effective speech settings as JSON
    Config {
        /// Settings file (defaults to the user config directory)
        #[arg(long, env = "CHATVOX_SETTINGS_FILE")]
        settings_file: Option<PathBuf>,
    },
}

/// Arguments for `chatvox serve`.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "CHATVOX_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "CHATVOX_PORT", default_value_t = chatvox_axum::DEFAULT_PORT)]
    pub port: u16,

    /// Directory for synthesized audio (defaults to the user cache directory)
    #[arg(long, env = "CHATVOX_SCRATCH_DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Synthesis program
    #[arg(long, env = "CHATVOX_TTS_COMMAND", default_value = chatvox_tts::backend::command::DEFAULT_PROGRAM)]
    pub tts_command: String,

    /// Argument template for the synthesis program (repeatable)
    ///
    /// Replaces the built-in template when given at least once.
    #[arg(long = "tts-arg", allow_hyphen_values = true)]
    pub tts_args: Vec<String>,

    /// Give up on a single synthesis after this many seconds
    #[arg(long)]
    pub synthesis_timeout_secs: Option<u64>,

    /// Settings file (defaults to the user config directory)
    #[arg(long, env = "CHATVOX_SETTINGS_FILE")]
    pub settings_file: Option<PathBuf>,

    /// Allowed CORS origin (repeatable; default allows any)
    #[arg(long = "allow-origin")]
    pub allowed_origins: Vec<String>,
}
