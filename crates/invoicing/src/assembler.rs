use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taxform_core::InvoiceRecordId;

use crate::calculator::InvoiceTotals;
use crate::customer::CustomerDetails;
use crate::header::InvoiceHeader;
use crate::line_item::LineItem;
use crate::validation::ValidatedDraft;

/// An issued invoice.
///
/// Holds owned copies of everything it was built from, so editing the
/// session afterwards cannot reach it. There are no mutators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedInvoice {
    id: InvoiceRecordId,
    header: InvoiceHeader,
    customer: CustomerDetails,
    line_items: Vec<LineItem>,
    totals: InvoiceTotals,
    created_at: DateTime<Utc>,
}

impl FinalizedInvoice {
    pub fn id(&self) -> InvoiceRecordId {
        self.id
    }

    pub fn header(&self) -> &InvoiceHeader {
        &self.header
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Totals fixed to two decimals.
    pub fn totals(&self) -> &InvoiceTotals {
        &self.totals
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Build the invoice record from a validated draft, stamped `created_at`.
pub fn assemble(draft: ValidatedDraft<'_>, created_at: DateTime<Utc>) -> FinalizedInvoice {
    let invoice = FinalizedInvoice {
        id: InvoiceRecordId::new(),
        header: draft.header.clone(),
        customer: draft.customer.clone(),
        line_items: draft.items.to_vec(),
        totals: InvoiceTotals::of(draft.items),
        created_at,
    };

    tracing::info!(
        record_id = %invoice.id,
        invoice_number = %invoice.header.invoice_number,
        lines = invoice.line_items.len(),
        grand_total = %invoice.totals.grand_total,
        "invoice finalized"
    );

    invoice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_item::TaxRate;
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal_macros::dec;
    use taxform_core::LineItemId;

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
    }

    fn draft_parts() -> (InvoiceHeader, CustomerDetails, Vec<LineItem>) {
        let mut header = InvoiceHeader::dated(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        header.invoice_number = "INV-1".to_string();
        let customer = CustomerDetails {
            name: "Acme".to_string(),
            email: "a@acme.com".to_string(),
            ..CustomerDetails::default()
        };
        let items = vec![
            LineItem {
                id: LineItemId::new(1),
                description: "Widget".to_string(),
                quantity: dec!(2),
                unit_price: dec!(100),
                tax_rate: TaxRate::Eighteen,
            },
            LineItem {
                id: LineItemId::new(3),
                description: "Support".to_string(),
                quantity: dec!(1.5),
                unit_price: dec!(33.33),
                tax_rate: TaxRate::Five,
            },
        ];
        (header, customer, items)
    }

    #[test]
    fn assemble_copies_draft_and_fixes_totals() {
        let (header, customer, items) = draft_parts();
        let draft = ValidatedDraft::check(&header, &customer, &items).unwrap();
        let invoice = assemble(draft, created_at());

        assert_eq!(invoice.header(), &header);
        assert_eq!(invoice.customer(), &customer);
        assert_eq!(invoice.line_items(), items.as_slice());
        assert_eq!(invoice.created_at(), created_at());

        // 200 + 49.995 = 249.995; tax 36 + 2.49975 = 38.49975.
        assert_eq!(invoice.totals().subtotal.to_string(), "250.00");
        assert_eq!(invoice.totals().tax_total.to_string(), "38.50");
        assert_eq!(invoice.totals().grand_total.to_string(), "288.49");
    }

    #[test]
    fn invoice_is_disconnected_from_its_sources() {
        let (header, customer, mut items) = draft_parts();
        let invoice = {
            let draft = ValidatedDraft::check(&header, &customer, &items).unwrap();
            assemble(draft, created_at())
        };

        items[0].description = "Changed".to_string();
        items.clear();

        assert_eq!(invoice.line_items().len(), 2);
        assert_eq!(invoice.line_items()[0].description, "Widget");
    }

    #[test]
    fn serialized_invoice_has_rfc3339_timestamp_and_string_totals() {
        let (header, customer, items) = draft_parts();
        let draft = ValidatedDraft::check(&header, &customer, &items).unwrap();
        let invoice = assemble(draft, created_at());

        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["createdAt"], "2025-01-15T09:30:00Z");
        assert_eq!(json["totals"]["grandTotal"], "288.49");
        assert_eq!(json["lineItems"][1]["id"], 3);

        let back: FinalizedInvoice = serde_json::from_value(json).unwrap();
        assert_eq!(back, invoice);
    }

    #[test]
    fn each_assembly_gets_a_fresh_record_id() {
        let (header, customer, items) = draft_parts();
        let first = assemble(
            ValidatedDraft::check(&header, &customer, &items).unwrap(),
            created_at(),
        );
        let second = assemble(
            ValidatedDraft::check(&header, &customer, &items).unwrap(),
            created_at(),
        );
        assert_ne!(first.id(), second.id());
    }
}
