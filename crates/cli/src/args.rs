//! Command-line arguments.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "taxform", version)]
#[command(about = "Replay a command script against a fresh invoice draft.")]
pub struct CommandLine {
    /// JSON array of session commands; `-` or nothing reads stdin
    pub script: Option<PathBuf>,

    /// Report format [overrides TAXFORM_OUTPUT]
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Prefix for amounts in text reports [overrides TAXFORM_CURRENCY_SYMBOL]
    #[arg(long)]
    pub currency_symbol: Option<String>,

    /// JSON-lines file finalized invoices are appended to [overrides TAXFORM_HANDOFF_PATH]
    #[arg(long)]
    pub handoff_path: Option<PathBuf>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Script file to read, or `None` for stdin.
    pub fn script_path(&self) -> Option<&Path> {
        self.script
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }
}
