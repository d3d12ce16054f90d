//! Editing session: the one owner of a draft invoice.
//!
//! The presentation layer drives a session through a closed set of commands
//! and re-reads [`InvoiceSession::snapshot`] after each one. Commands run to
//! completion synchronously; there is no shared state and nothing to lock.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use taxform_core::{DomainResult, LineItemId};

use crate::assembler::{FinalizedInvoice, assemble};
use crate::calculator::{InvoiceTotals, Totals, line_amount, line_tax, to_presentation};
use crate::customer::{CustomerDetails, CustomerField};
use crate::header::{HeaderField, InvoiceHeader};
use crate::line_item::{LineField, LineItem};
use crate::store::LineItemStore;
use crate::validation::{Rejection, ValidatedDraft, ValidationResult, validate};

/// Command sent by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum SessionCommand {
    AddLine,
    RemoveLine {
        id: LineItemId,
    },
    UpdateField {
        id: LineItemId,
        field: LineField,
        value: String,
    },
    SetHeaderField {
        field: HeaderField,
        value: String,
    },
    SetCustomerField {
        field: CustomerField,
        value: String,
    },
    Submit,
    Reset,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum CommandOutcome {
    /// State changed.
    Applied,
    /// The command was valid but had nothing to act on (unknown line id,
    /// removing the last line).
    Ignored,
    LineAdded { id: LineItemId },
    Finalized { invoice: FinalizedInvoice },
    Rejected { rejection: Rejection },
}

/// One row as rendered: the line plus its presented amount and tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    #[serde(flatten)]
    pub item: LineItem,
    pub amount: Decimal,
    pub tax: Decimal,
}

/// Everything the presentation layer needs to render the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub header: InvoiceHeader,
    pub customer: CustomerDetails,
    pub lines: Vec<LineView>,
    pub can_remove: bool,
    pub totals: InvoiceTotals,
}

/// A single editor's draft invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSession {
    store: LineItemStore,
    header: InvoiceHeader,
    customer: CustomerDetails,
}

impl InvoiceSession {
    /// A blank draft dated today (UTC).
    pub fn new() -> Self {
        Self::starting_on(Utc::now().date_naive())
    }

    /// A blank draft dated `invoice_date`.
    pub fn starting_on(invoice_date: NaiveDate) -> Self {
        Self {
            store: LineItemStore::new(),
            header: InvoiceHeader::dated(invoice_date),
            customer: CustomerDetails::default(),
        }
    }

    pub fn store(&self) -> &LineItemStore {
        &self.store
    }

    pub fn items(&self) -> &[LineItem] {
        self.store.items()
    }

    pub fn header(&self) -> &InvoiceHeader {
        &self.header
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn add_line(&mut self) -> LineItemId {
        self.store.add_line()
    }

    pub fn remove_line(&mut self, id: LineItemId) -> bool {
        self.store.remove_line(id)
    }

    pub fn update_field(&mut self, id: LineItemId, field: LineField, raw: &str) -> bool {
        self.store.update_field(id, field, raw)
    }

    pub fn set_header_field(&mut self, field: HeaderField, value: &str) -> DomainResult<()> {
        self.header.set_field(field, value)
    }

    pub fn set_customer_field(&mut self, field: CustomerField, value: &str) {
        self.customer.set_field(field, value);
    }

    /// Unrounded totals of the current lines.
    pub fn totals(&self) -> Totals {
        Totals::compute(self.store.items())
    }

    pub fn validate(&self) -> ValidationResult {
        validate(&self.header, &self.customer, self.store.items())
    }

    /// Validate and, if the draft is complete, produce the invoice stamped now.
    pub fn submit(&self) -> Result<FinalizedInvoice, Rejection> {
        self.submit_at(Utc::now())
    }

    /// Validate and, if the draft is complete, produce the invoice stamped
    /// `created_at`. The session is left as it was either way.
    pub fn submit_at(&self, created_at: DateTime<Utc>) -> Result<FinalizedInvoice, Rejection> {
        match ValidatedDraft::check(&self.header, &self.customer, self.store.items()) {
            Ok(draft) => Ok(assemble(draft, created_at)),
            Err(rejection) => {
                tracing::debug!(failures = ?rejection.failures, "submission rejected");
                Err(rejection)
            }
        }
    }

    /// Discard the draft; the new one is dated today (UTC).
    pub fn reset(&mut self) {
        self.reset_on(Utc::now().date_naive());
    }

    pub fn reset_on(&mut self, invoice_date: NaiveDate) {
        *self = Self::starting_on(invoice_date);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let lines = self
            .store
            .items()
            .iter()
            .map(|item| LineView {
                item: item.clone(),
                amount: to_presentation(line_amount(item)),
                tax: to_presentation(line_tax(item)),
            })
            .collect();

        SessionSnapshot {
            header: self.header.clone(),
            customer: self.customer.clone(),
            lines,
            can_remove: self.store.can_remove(),
            totals: self.totals().presented(),
        }
    }

    /// Apply one command, stamping any finalized invoice with `now`.
    ///
    /// Only a malformed header date is an error; everything else has a
    /// well-defined outcome.
    pub fn apply(
        &mut self,
        command: SessionCommand,
        now: DateTime<Utc>,
    ) -> DomainResult<CommandOutcome> {
        let outcome = match command {
            SessionCommand::AddLine => CommandOutcome::LineAdded {
                id: self.add_line(),
            },
            SessionCommand::RemoveLine { id } => changed(self.remove_line(id)),
            SessionCommand::UpdateField { id, field, value } => {
                changed(self.update_field(id, field, &value))
            }
            SessionCommand::SetHeaderField { field, value } => {
                self.set_header_field(field, &value)?;
                CommandOutcome::Applied
            }
            SessionCommand::SetCustomerField { field, value } => {
                self.set_customer_field(field, &value);
                CommandOutcome::Applied
            }
            SessionCommand::Submit => match self.submit_at(now) {
                Ok(invoice) => CommandOutcome::Finalized { invoice },
                Err(rejection) => CommandOutcome::Rejected { rejection },
            },
            SessionCommand::Reset => {
                self.reset_on(now.date_naive());
                CommandOutcome::Applied
            }
        };
        Ok(outcome)
    }
}

fn changed(applied: bool) -> CommandOutcome {
    if applied {
        CommandOutcome::Applied
    } else {
        CommandOutcome::Ignored
    }
}

impl Default for InvoiceSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationFailure;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use taxform_core::DomainError;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
    }

    fn fill_widget_draft(session: &mut InvoiceSession) {
        let id = session.items()[0].id;
        session.update_field(id, LineField::Description, "Widget");
        session.update_field(id, LineField::Quantity, "2");
        session.update_field(id, LineField::UnitPrice, "100");
        session.update_field(id, LineField::TaxRate, "18");
        session
            .set_header_field(HeaderField::InvoiceNumber, "INV-1")
            .unwrap();
        session.set_customer_field(CustomerField::Name, "Acme");
        session.set_customer_field(CustomerField::Email, "a@acme.com");
    }

    #[test]
    fn new_session_has_defaults() {
        let session = InvoiceSession::starting_on(start());
        assert_eq!(session.items().len(), 1);
        assert_eq!(session.items()[0].id, LineItemId::FIRST);
        assert_eq!(session.header().invoice_date, start());
        assert_eq!(session.customer(), &CustomerDetails::default());
    }

    #[test]
    fn widget_scenario_submits() {
        let mut session = InvoiceSession::starting_on(start());
        fill_widget_draft(&mut session);

        assert!(session.validate().is_valid());
        let invoice = session.submit_at(now()).unwrap();
        assert_eq!(invoice.totals().subtotal.to_string(), "200.00");
        assert_eq!(invoice.totals().tax_total.to_string(), "36.00");
        assert_eq!(invoice.totals().grand_total.to_string(), "236.00");
        assert_eq!(invoice.created_at(), now());
    }

    #[test]
    fn submit_without_email_changes_nothing() {
        let mut session = InvoiceSession::starting_on(start());
        fill_widget_draft(&mut session);
        session.set_customer_field(CustomerField::Email, "");
        let before = session.clone();

        let rejection = session.submit_at(now()).unwrap_err();
        assert!(rejection.contains(ValidationFailure::MissingEmail));
        assert_eq!(session, before);
    }

    #[test]
    fn finalized_invoice_survives_later_edits() {
        let mut session = InvoiceSession::starting_on(start());
        fill_widget_draft(&mut session);
        let invoice = session.submit_at(now()).unwrap();

        session.update_field(LineItemId::FIRST, LineField::Quantity, "50");
        session.add_line();
        session.set_customer_field(CustomerField::Name, "Someone Else");

        assert_eq!(invoice.line_items().len(), 1);
        assert_eq!(invoice.line_items()[0].quantity, dec!(2));
        assert_eq!(invoice.customer().name, "Acme");
        assert_eq!(invoice.totals().grand_total.to_string(), "236.00");
    }

    #[test]
    fn reset_restores_blank_draft() {
        let mut session = InvoiceSession::starting_on(start());
        fill_widget_draft(&mut session);
        session.add_line();
        session.add_line();
        session.remove_line(LineItemId::FIRST);
        session
            .set_header_field(HeaderField::DueDate, "2025-07-01")
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        session.reset_on(today);

        assert_eq!(session, InvoiceSession::starting_on(today));
        assert_eq!(session.items()[0].id, LineItemId::FIRST);
        assert_eq!(session.header().invoice_number, "");
        assert_eq!(session.header().due_date, None);
    }

    #[test]
    fn snapshot_presents_lines_and_totals() {
        let mut session = InvoiceSession::starting_on(start());
        fill_widget_draft(&mut session);
        let second = session.add_line();
        session.update_field(second, LineField::UnitPrice, "10.005");

        let snapshot = session.snapshot();
        assert!(snapshot.can_remove);
        assert_eq!(snapshot.lines.len(), 2);
        assert_eq!(snapshot.lines[0].amount.to_string(), "200.00");
        assert_eq!(snapshot.lines[0].tax.to_string(), "36.00");
        assert_eq!(snapshot.lines[1].amount.to_string(), "10.01");
        assert_eq!(snapshot.totals.subtotal.to_string(), "210.01");
    }

    #[test]
    fn snapshot_of_fresh_session_cannot_remove() {
        let snapshot = InvoiceSession::starting_on(start()).snapshot();
        assert!(!snapshot.can_remove);
        assert_eq!(snapshot.totals.grand_total.to_string(), "0.00");
    }

    #[test]
    fn apply_reports_outcomes() {
        let mut session = InvoiceSession::starting_on(start());

        assert_eq!(
            session.apply(SessionCommand::RemoveLine { id: LineItemId::FIRST }, now()),
            Ok(CommandOutcome::Ignored)
        );
        assert_eq!(
            session.apply(SessionCommand::AddLine, now()),
            Ok(CommandOutcome::LineAdded { id: LineItemId::new(2) })
        );
        assert_eq!(
            session.apply(
                SessionCommand::UpdateField {
                    id: LineItemId::new(7),
                    field: LineField::Description,
                    value: "Ghost".to_string(),
                },
                now()
            ),
            Ok(CommandOutcome::Ignored)
        );

        match session.apply(SessionCommand::Submit, now()) {
            Ok(CommandOutcome::Rejected { rejection }) => assert_eq!(rejection.failures.len(), 4),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn apply_rejects_malformed_dates_without_changes() {
        let mut session = InvoiceSession::starting_on(start());
        let before = session.clone();
        let result = session.apply(
            SessionCommand::SetHeaderField {
                field: HeaderField::InvoiceDate,
                value: "yesterday".to_string(),
            },
            now(),
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(session, before);
    }

    #[test]
    fn apply_reset_dates_draft_from_command_time() {
        let mut session = InvoiceSession::starting_on(start());
        session.apply(SessionCommand::Reset, now()).unwrap();
        assert_eq!(session.header().invoice_date, now().date_naive());
    }

    #[test]
    fn commands_deserialize_from_form_names() {
        let command: SessionCommand = serde_json::from_str(
            r#"{"command":"updateField","id":1,"field":"gstRate","value":"5"}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            SessionCommand::UpdateField {
                id: LineItemId::FIRST,
                field: LineField::TaxRate,
                value: "5".to_string(),
            }
        );

        let command: SessionCommand = serde_json::from_str(
            r#"{"command":"setCustomerField","field":"pincode","value":"560001"}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            SessionCommand::SetCustomerField {
                field: CustomerField::PostalCode,
                value: "560001".to_string(),
            }
        );

        let unknown = serde_json::from_str::<SessionCommand>(
            r#"{"command":"setCustomerField","field":"fax","value":"1"}"#,
        );
        assert!(unknown.is_err());
    }
}
