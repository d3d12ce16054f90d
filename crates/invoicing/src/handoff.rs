//! Handoff of finalized invoices to whatever renders or transmits them.
//!
//! The core's job ends once a [`FinalizedInvoice`] exists. A sink is the
//! boundary it crosses next: a printer queue, a backend client, a file.
//! Sinks may see the same invoice more than once and should treat the
//! record id as the idempotency key.

use std::collections::HashSet;
use std::convert::Infallible;
use std::io::Write;

use thiserror::Error;

use taxform_core::InvoiceRecordId;

use crate::assembler::FinalizedInvoice;

/// Receiver of finalized invoices.
pub trait InvoiceSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn deliver(&mut self, invoice: &FinalizedInvoice) -> Result<(), Self::Error>;
}

impl<S> InvoiceSink for &mut S
where
    S: InvoiceSink + ?Sized,
{
    type Error = S::Error;

    fn deliver(&mut self, invoice: &FinalizedInvoice) -> Result<(), Self::Error> {
        (**self).deliver(invoice)
    }
}

/// Keeps delivered invoices in memory, once per record id.
#[derive(Debug, Default)]
pub struct InMemorySink {
    delivered: Vec<FinalizedInvoice>,
    seen: HashSet<InvoiceRecordId>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> &[FinalizedInvoice] {
        &self.delivered
    }
}

impl InvoiceSink for InMemorySink {
    type Error = Infallible;

    fn deliver(&mut self, invoice: &FinalizedInvoice) -> Result<(), Self::Error> {
        if self.seen.insert(invoice.id()) {
            self.delivered.push(invoice.clone());
        } else {
            tracing::debug!(record_id = %invoice.id(), "duplicate handoff ignored");
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("failed to encode invoice: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write invoice: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes each invoice as one JSON document per line.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> InvoiceSink for JsonLinesSink<W> {
    type Error = HandoffError;

    fn deliver(&mut self, invoice: &FinalizedInvoice) -> Result<(), Self::Error> {
        serde_json::to_writer(&mut self.writer, invoice)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
