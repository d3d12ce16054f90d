//! Finalization gate.
//!
//! [`validate`] is a pure diagnostic: it runs every check and reports every
//! failure, in a fixed order. [`ValidatedDraft`] is the only way into the
//! assembler, so an invoice cannot be built from a draft that has not
//! passed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::customer::CustomerDetails;
use crate::header::InvoiceHeader;
use crate::line_item::LineItem;

/// Reason a draft cannot be finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailure {
    MissingCustomerName,
    MissingEmail,
    MissingInvoiceNumber,
    IncompleteLineItems,
}

impl ValidationFailure {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            ValidationFailure::MissingCustomerName => "missing_customer_name",
            ValidationFailure::MissingEmail => "missing_email",
            ValidationFailure::MissingInvoiceNumber => "missing_invoice_number",
            ValidationFailure::IncompleteLineItems => "incomplete_line_items",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ValidationFailure::MissingCustomerName => "missing customer name",
            ValidationFailure::MissingEmail => "missing email",
            ValidationFailure::MissingInvoiceNumber => "missing invoice number",
            ValidationFailure::IncompleteLineItems => {
                "every line item needs a description, a positive quantity and a positive unit price"
            }
        }
    }
}

impl core::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<ValidationFailure>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Failures in check order; empty when valid.
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(failures) => failures,
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check a draft for completeness.
///
/// All checks run; failures are reported in this order: customer name,
/// email (presence only), invoice number, line items. The line-item check
/// is a single aggregate failure however many rows are incomplete.
pub fn validate(
    header: &InvoiceHeader,
    customer: &CustomerDetails,
    items: &[LineItem],
) -> ValidationResult {
    let mut failures = Vec::new();

    if is_blank(&customer.name) {
        failures.push(ValidationFailure::MissingCustomerName);
    }
    if is_blank(&customer.email) {
        failures.push(ValidationFailure::MissingEmail);
    }
    if is_blank(&header.invoice_number) {
        failures.push(ValidationFailure::MissingInvoiceNumber);
    }
    if !items.iter().all(LineItem::is_complete) {
        failures.push(ValidationFailure::IncompleteLineItems);
    }

    if failures.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(failures)
    }
}

/// A submission that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("invoice draft rejected: {}", describe(.failures))]
pub struct Rejection {
    pub failures: Vec<ValidationFailure>,
}

impl Rejection {
    pub fn contains(&self, failure: ValidationFailure) -> bool {
        self.failures.contains(&failure)
    }
}

fn describe(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(|failure| failure.message())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Borrowed view of a draft that passed [`validate`].
///
/// Only [`ValidatedDraft::check`] constructs one.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedDraft<'a> {
    pub(crate) header: &'a InvoiceHeader,
    pub(crate) customer: &'a CustomerDetails,
    pub(crate) items: &'a [LineItem],
}

impl<'a> ValidatedDraft<'a> {
    pub fn check(
        header: &'a InvoiceHeader,
        customer: &'a CustomerDetails,
        items: &'a [LineItem],
    ) -> Result<Self, Rejection> {
        match validate(header, customer, items) {
            ValidationResult::Valid => Ok(Self {
                header,
                customer,
                items,
            }),
            ValidationResult::Invalid(failures) => Err(Rejection { failures }),
        }
    }
}
