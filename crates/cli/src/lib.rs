//! `taxform-cli`
//!
//! **Responsibility:** headless driver for the invoice drafting engine.
//!
//! Replays a JSON script of session commands, hands finalized invoices to a
//! sink and reports the resulting state. It is a thin shell: every rule
//! lives in `taxform-invoicing`.

pub mod args;
pub mod config;
pub mod render;
pub mod runner;

pub use args::CommandLine;
pub use config::{CliConfig, OutputFormat, RejectedSetting};
pub use runner::{ScriptReport, load_script, run_script};
