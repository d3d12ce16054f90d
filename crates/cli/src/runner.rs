//! Script replay.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use taxform_invoicing::{
    CommandOutcome, FinalizedInvoice, InvoiceSession, InvoiceSink, Rejection, SessionCommand,
    SessionSnapshot,
};

/// Result of replaying a script: one outcome per command plus the final
/// state of the session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptReport {
    pub outcomes: Vec<CommandOutcome>,
    pub snapshot: SessionSnapshot,
}

impl ScriptReport {
    pub fn finalized(&self) -> impl Iterator<Item = &FinalizedInvoice> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            CommandOutcome::Finalized { invoice } => Some(invoice),
            _ => None,
        })
    }

    pub fn rejections(&self) -> impl Iterator<Item = &Rejection> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            CommandOutcome::Rejected { rejection } => Some(rejection),
            _ => None,
        })
    }
}

/// Parse a JSON array of commands.
pub fn load_script(text: &str) -> Result<Vec<SessionCommand>> {
    serde_json::from_str(text).context("failed to parse command script")
}

/// Apply `commands` in order, delivering every finalized invoice to `sink`.
///
/// `clock` stamps submissions and dates resets. A malformed header date
/// aborts the run with the failing command's position.
pub fn run_script<S, C>(
    session: &mut InvoiceSession,
    commands: Vec<SessionCommand>,
    sink: &mut S,
    clock: C,
) -> Result<ScriptReport>
where
    S: InvoiceSink,
    C: Fn() -> DateTime<Utc>,
{
    let mut outcomes = Vec::with_capacity(commands.len());

    for (index, command) in commands.into_iter().enumerate() {
        let position = index + 1;
        tracing::debug!(position, ?command, "applying command");

        let outcome = session
            .apply(command, clock())
            .with_context(|| format!("command #{position} failed"))?;

        match &outcome {
            CommandOutcome::Finalized { invoice } => {
                sink.deliver(invoice)
                    .with_context(|| format!("handing off invoice from command #{position}"))?;
            }
            CommandOutcome::Rejected { rejection } => {
                tracing::info!(position, %rejection, "submission rejected");
            }
            _ => {}
        }

        outcomes.push(outcome);
    }

    Ok(ScriptReport {
        outcomes,
        snapshot: session.snapshot(),
    })
}
