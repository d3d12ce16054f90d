//! Environment-driven configuration.
//!
//! `TAXFORM_*` variables set the defaults; command-line flags override them.
//! Malformed variables fall back to defaults and are returned as
//! [`RejectedSetting`]s so they can be logged once tracing is up.

use std::path::PathBuf;

use clap::ValueEnum;

use taxform_invoicing::calculator::DEFAULT_CURRENCY_SYMBOL;
use taxform_observability::LogFormat;

use crate::args::CommandLine;

/// How the final report is printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// An environment value that was ignored in favour of the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedSetting {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl RejectedSetting {
    pub fn warn(&self) {
        tracing::warn!(
            key = self.key,
            value = %self.value,
            reason = %self.reason,
            "setting ignored; using default"
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub currency_symbol: String,
    pub output: OutputFormat,
    /// JSON-lines file that finalized invoices are appended to.
    pub handoff_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            output: OutputFormat::default(),
            handoff_path: None,
        }
    }
}

impl CliConfig {
    /// Read `TAXFORM_*` variables from the process environment.
    pub fn from_env() -> (Self, Vec<RejectedSetting>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset values keep their defaults,
    /// malformed ones are reported back.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<RejectedSetting>) {
        let mut config = Self::default();
        let mut rejected = Vec::new();

        if let Some(symbol) = lookup("TAXFORM_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("TAXFORM_OUTPUT") {
            match <OutputFormat as ValueEnum>::from_str(raw.trim(), true) {
                Ok(output) => config.output = output,
                Err(reason) => rejected.push(RejectedSetting {
                    key: "TAXFORM_OUTPUT",
                    value: raw,
                    reason,
                }),
            }
        }

        config.handoff_path = lookup("TAXFORM_HANDOFF_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        (config, rejected)
    }

    /// Apply flags given on the command line.
    pub fn with_overrides(mut self, args: &CommandLine) -> Self {
        if let Some(output) = args.output {
            self.output = output;
        }
        if let Some(symbol) = &args.currency_symbol {
            self.currency_symbol = symbol.clone();
        }
        if let Some(path) = &args.handoff_path {
            self.handoff_path = Some(path.clone());
        }
        self
    }

    /// Machine-readable output gets machine-readable logs.
    pub fn log_format(&self) -> LogFormat {
        match self.output {
            OutputFormat::Json => LogFormat::Json,
            OutputFormat::Text => LogFormat::Pretty,
        }
    }
}
