//! CLI parse: clap types for scoped-with. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// scoped-with - run work inside resources that always get released
#[derive(Parser)]
#[command(name = "scoped-with")]
#[command(about = "Scoped resource demonstrations: enter, run a block, always exit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a text file inside a file-reader scope
    Read {
        /// File to read
        path: PathBuf,
    },
    /// Write KEY=VALUE settings inside a settings-writer scope
    Write {
        /// Settings store directory (defaults to the configured store)
        #[arg(long)]
        store: Option<PathBuf>,
        /// Fail the block after this many writes
        #[arg(long)]
        fail_after: Option<usize>,
        /// Settings as KEY=VALUE; VALUE is stored as JSON when it parses as JSON
        #[arg(required = true)]
        pairs: Vec<String>,
    },
    /// List settings using the store itself as the scoped resource
    Show {
        /// Settings store directory (defaults to the configured store)
        #[arg(long)]
        store: Option<PathBuf>,
    },
}
