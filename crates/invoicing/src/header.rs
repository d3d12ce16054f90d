use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use taxform_core::{DomainError, DomainResult, ValueObject};

/// Invoice number and dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceHeader {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
}

impl InvoiceHeader {
    /// A blank header dated `invoice_date`.
    pub fn dated(invoice_date: NaiveDate) -> Self {
        Self {
            invoice_number: String::new(),
            invoice_date,
            due_date: None,
        }
    }

    /// Store raw form input into `field`.
    ///
    /// Dates are ISO `YYYY-MM-DD`. An empty due date clears it; the invoice
    /// date cannot be cleared. Malformed dates leave the header unchanged.
    pub fn set_field(&mut self, field: HeaderField, raw: &str) -> DomainResult<()> {
        match field {
            HeaderField::InvoiceNumber => self.invoice_number = raw.to_string(),
            HeaderField::InvoiceDate => self.invoice_date = parse_date(raw, "invoiceDate")?,
            HeaderField::DueDate => {
                self.due_date = if raw.trim().is_empty() {
                    None
                } else {
                    Some(parse_date(raw, "dueDate")?)
                };
            }
        }
        Ok(())
    }
}

impl ValueObject for InvoiceHeader {}

fn parse_date(raw: &str, field: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| DomainError::validation(format!("{field}: expected YYYY-MM-DD ({e})")))
}

/// Editable header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum HeaderField {
    InvoiceNumber,
    InvoiceDate,
    DueDate,
}

impl FromStr for HeaderField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invoiceNumber" | "invoice_number" => Ok(HeaderField::InvoiceNumber),
            "invoiceDate" | "invoice_date" => Ok(HeaderField::InvoiceDate),
            "dueDate" | "due_date" => Ok(HeaderField::DueDate),
            other => Err(DomainError::unknown_field(other)),
        }
    }
}

impl TryFrom<String> for HeaderField {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dated_header_is_blank() {
        let header = InvoiceHeader::dated(day(2025, 3, 1));
        assert_eq!(header.invoice_number, "");
        assert_eq!(header.invoice_date, day(2025, 3, 1));
        assert_eq!(header.due_date, None);
    }

    #[test]
    fn sets_and_clears_due_date() {
        let mut header = InvoiceHeader::dated(day(2025, 3, 1));
        header.set_field(HeaderField::DueDate, "2025-03-31").unwrap();
        assert_eq!(header.due_date, Some(day(2025, 3, 31)));
        header.set_field(HeaderField::DueDate, "").unwrap();
        assert_eq!(header.due_date, None);
    }

    #[test]
    fn malformed_date_leaves_header_unchanged() {
        let mut header = InvoiceHeader::dated(day(2025, 3, 1));
        let before = header.clone();
        let err = header
            .set_field(HeaderField::InvoiceDate, "2025-13-01")
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("invoiceDate")));
        assert_eq!(header, before);
    }

    #[test]
    fn empty_invoice_date_is_rejected() {
        let mut header = InvoiceHeader::dated(day(2025, 3, 1));
        assert!(header.set_field(HeaderField::InvoiceDate, "").is_err());
        assert_eq!(header.invoice_date, day(2025, 3, 1));
    }

    #[test]
    fn invoice_number_is_verbatim() {
        let mut header = InvoiceHeader::dated(day(2025, 3, 1));
        header.set_field(HeaderField::InvoiceNumber, "INV-2025-001").unwrap();
        assert_eq!(header.invoice_number, "INV-2025-001");
    }

    #[test]
    fn header_serializes_with_form_names() {
        let header = InvoiceHeader::dated(day(2025, 3, 1));
        let json = serde_json::to_value(&header).unwrap();
        assert_eq!(json["invoiceDate"], "2025-03-01");
        assert!(json["dueDate"].is_null());
    }
}
