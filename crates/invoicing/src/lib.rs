//! Invoice drafting engine.
//!
//! This crate holds the business rules for assembling a tax invoice: the
//! line-item store, the amount calculator, the finalization gate and the
//! assembler that produces an immutable invoice record. Everything here is
//! deterministic, single-threaded domain logic (no IO apart from the
//! JSON-lines handoff sink, no rendering).

pub mod assembler;
pub mod calculator;
pub mod customer;
pub mod handoff;
pub mod header;
pub mod line_item;
pub mod session;
pub mod store;
pub mod validation;

pub use assembler::{FinalizedInvoice, assemble};
pub use calculator::{InvoiceTotals, Totals, format_amount, to_presentation};
pub use customer::{CustomerDetails, CustomerField};
pub use handoff::{HandoffError, InMemorySink, InvoiceSink, JsonLinesSink};
pub use header::{HeaderField, InvoiceHeader};
pub use line_item::{LineField, LineItem, TaxRate, parse_numeric_field};
pub use session::{CommandOutcome, InvoiceSession, LineView, SessionCommand, SessionSnapshot};
pub use store::LineItemStore;
pub use validation::{Rejection, ValidatedDraft, ValidationFailure, ValidationResult, validate};
