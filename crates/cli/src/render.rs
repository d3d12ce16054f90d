//! Plain-text report.

use std::fmt::Write as _;

use taxform_invoicing::{FinalizedInvoice, format_amount};

use crate::runner::ScriptReport;

/// Render a report for a terminal.
pub fn text_report(report: &ScriptReport, currency_symbol: &str) -> String {
    let mut out = String::new();
    let money = |amount| format_amount(amount, currency_symbol);

    for invoice in report.finalized() {
        render_invoice(&mut out, invoice, currency_symbol);
    }

    for rejection in report.rejections() {
        let _ = writeln!(out, "Submission rejected:");
        for failure in &rejection.failures {
            let _ = writeln!(out, "  - [{}] {}", failure.code(), failure.message());
        }
    }

    let snapshot = &report.snapshot;
    let _ = writeln!(out, "Draft ({} line(s)):", snapshot.lines.len());
    for line in &snapshot.lines {
        let description = if line.item.description.is_empty() {
            "(no description)"
        } else {
            line.item.description.as_str()
        };
        let _ = writeln!(
            out,
            "  #{:<3} {:<30} {:>8} x {:>12} @ {:>3}  = {:>14}  tax {:>12}",
            line.item.id,
            description,
            line.item.quantity,
            money(line.item.unit_price),
            line.item.tax_rate,
            money(line.amount),
            money(line.tax),
        );
    }
    let _ = writeln!(out, "  Subtotal:    {}", money(snapshot.totals.subtotal));
    let _ = writeln!(out, "  Total tax:   {}", money(snapshot.totals.tax_total));
    let _ = writeln!(out, "  Grand total: {}", money(snapshot.totals.grand_total));

    out
}

fn render_invoice(out: &mut String, invoice: &FinalizedInvoice, currency_symbol: &str) {
    let header = invoice.header();
    let customer = invoice.customer();
    let totals = invoice.totals();

    let _ = writeln!(out, "Invoice {} ({})", header.invoice_number, invoice.id());
    let _ = writeln!(out, "  Date:     {}", header.invoice_date);
    if let Some(due) = header.due_date {
        let _ = writeln!(out, "  Due:      {due}");
    }
    let _ = writeln!(out, "  Customer: {} <{}>", customer.name, customer.email);
    if !customer.tax_id.is_empty() {
        let _ = writeln!(out, "  Tax ID:   {}", customer.tax_id);
    }
    let _ = writeln!(out, "  Lines:    {}", invoice.line_items().len());
    let _ = writeln!(out, "  Subtotal:    {currency_symbol}{}", totals.subtotal);
    let _ = writeln!(out, "  Total tax:   {currency_symbol}{}", totals.tax_total);
    let _ = writeln!(out, "  Grand total: {currency_symbol}{}", totals.grand_total);
    let _ = writeln!(out, "  Created:  {}", invoice.created_at().to_rfc3339());
}
