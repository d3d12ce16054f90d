//! `taxform`: replay a command script against a fresh invoice draft.

use std::fs::OpenOptions;
use std::io::{BufWriter, Read};

use anyhow::{Context, Result};
use chrono::Utc;

use taxform_cli::{CliConfig, CommandLine, OutputFormat, load_script, render, run_script};
use taxform_invoicing::{InMemorySink, InvoiceSession, JsonLinesSink};

fn main() -> Result<()> {
    let args = CommandLine::parse_args();
    let (config, rejected) = CliConfig::from_env();
    let config = config.with_overrides(&args);
    taxform_observability::tracing::init(config.log_format());
    for setting in &rejected {
        setting.warn();
    }

    let (script, source) = match args.script_path() {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (text, path.display().to_string())
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read script from stdin")?;
            (text, "stdin".to_string())
        }
    };
    let commands = load_script(&script)?;
    tracing::info!(commands = commands.len(), source = %source, "replaying script");

    let mut session = InvoiceSession::new();
    let report = match &config.handoff_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open handoff file {}", path.display()))?;
            let mut sink = JsonLinesSink::new(BufWriter::new(file));
            run_script(&mut session, commands, &mut sink, Utc::now)?
        }
        None => {
            let mut sink = InMemorySink::new();
            run_script(&mut session, commands, &mut sink, Utc::now)?
        }
    };

    match config.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", render::text_report(&report, &config.currency_symbol)),
    }

    Ok(())
}
