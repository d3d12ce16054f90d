//! Amount calculator.
//!
//! Pure functions over line items. Sums are accumulated unrounded; rounding
//! to two decimals happens only when a value is presented
//! ([`to_presentation`], [`InvoiceTotals`]). Nothing here can fail: an
//! amount too large to present with two decimals (beyond
//! [`presentable_limit`]) counts as zero and is logged.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use taxform_core::ValueObject;

use crate::line_item::LineItem;

/// Decimal places of every presented amount.
pub const PRESENTATION_DECIMALS: u32 = 2;

/// Currency symbol used when nothing else is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Largest magnitude the decimal type can hold at two decimal places,
/// `792281625142643375935439503.35`.
pub fn presentable_limit() -> Decimal {
    Decimal::from_parts(u32::MAX, u32::MAX, u32::MAX, false, PRESENTATION_DECIMALS)
}

fn presentable(amount: Option<Decimal>) -> Option<Decimal> {
    amount.filter(|value| value.abs() <= presentable_limit())
}

/// `quantity × unit_price`.
pub fn line_amount(item: &LineItem) -> Decimal {
    presentable(item.quantity.checked_mul(item.unit_price)).unwrap_or_else(|| {
        tracing::warn!(line = %item.id, "line amount out of range; counted as zero");
        Decimal::ZERO
    })
}

/// `line_amount × tax_rate / 100`.
pub fn line_tax(item: &LineItem) -> Decimal {
    let fraction = item.tax_rate.percent() / Decimal::ONE_HUNDRED;
    presentable(line_amount(item).checked_mul(fraction)).unwrap_or_else(|| {
        tracing::warn!(line = %item.id, "line tax out of range; counted as zero");
        Decimal::ZERO
    })
}

/// Sum of line amounts before tax.
pub fn subtotal(items: &[LineItem]) -> Decimal {
    checked_sum(items.iter().map(line_amount), "subtotal")
}

/// Sum of line taxes.
pub fn tax_total(items: &[LineItem]) -> Decimal {
    checked_sum(items.iter().map(line_tax), "tax total")
}

/// `subtotal + tax_total`.
pub fn grand_total(items: &[LineItem]) -> Decimal {
    Totals::compute(items).grand_total
}

fn checked_sum(amounts: impl Iterator<Item = Decimal>, what: &'static str) -> Decimal {
    amounts.fold(Decimal::ZERO, |acc, amount| {
        presentable(acc.checked_add(amount)).unwrap_or_else(|| {
            tracing::warn!(what, "sum out of range; skipping amount");
            acc
        })
    })
}

/// Round to two decimals (half away from zero) with a fixed scale, so
/// `236` presents as `236.00`.
///
/// Only values within [`presentable_limit`] can carry two decimals; larger
/// ones keep the widest scale that fits. Every calculator output is within
/// the limit.
pub fn to_presentation(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(PRESENTATION_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRESENTATION_DECIMALS);
    rounded
}

/// Presentation string with a currency prefix, e.g. `₹236.00`.
pub fn format_amount(amount: Decimal, currency_symbol: &str) -> String {
    format!("{currency_symbol}{}", to_presentation(amount))
}

/// Unrounded invoice totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax_total: Decimal,
    pub grand_total: Decimal,
}

impl Totals {
    pub fn compute(items: &[LineItem]) -> Self {
        let subtotal = subtotal(items);
        let tax_total = tax_total(items);
        let grand_total = presentable(subtotal.checked_add(tax_total)).unwrap_or_else(|| {
            tracing::warn!("grand total out of range; reporting subtotal only");
            subtotal
        });

        Self {
            subtotal,
            tax_total,
            grand_total,
        }
    }

    /// Totals fixed to two decimals.
    pub fn presented(&self) -> InvoiceTotals {
        InvoiceTotals {
            subtotal: to_presentation(self.subtotal),
            tax_total: to_presentation(self.tax_total),
            grand_total: to_presentation(self.grand_total),
        }
    }
}

impl ValueObject for Totals {}

/// Totals as they appear on an invoice: exactly two decimal places each.
///
/// Serialized as decimal strings (`"236.00"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax_total: Decimal,
    pub grand_total: Decimal,
}

impl InvoiceTotals {
    pub fn of(items: &[LineItem]) -> Self {
        Totals::compute(items).presented()
    }
}

impl ValueObject for InvoiceTotals {}
