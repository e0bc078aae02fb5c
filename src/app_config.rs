//! Command-line interface definition
//!
//! The `greeting-bridge` binary runs on the build host. It exercises the same
//! code the Android app loads and checks the symbol contract before packaging.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line interface definition for the greeting bridge
#[derive(Parser)]
#[command(name = "greeting-bridge")]
#[command(about = "Inspect and validate the native greeting bridge", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file; the embedded bridge.toml when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the greeting and the bytes handed to the JVM
    Greet,

    /// Print the JNI symbol for a native method
    Mangle {
        /// Fully qualified class, dotted or slashed
        class: String,

        method: String,

        /// Method descriptor such as "(I)Ljava/lang/String;" for the overload form
        #[arg(long)]
        signature: Option<String>,
    },

    /// Verify the exported symbols against the configured managed binding
    Check,

    /// Print the effective configuration
    Config,
}
