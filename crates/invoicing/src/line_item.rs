use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use taxform_core::{DomainError, Entity, LineItemId, ValueObject};

/// Flat tax rate applied to a line item.
///
/// Only the fixed slabs below exist; there is no free-form percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaxRate {
    Zero,
    Five,
    Twelve,
    Eighteen,
    TwentyEight,
}

impl TaxRate {
    /// Every selectable rate, in ascending order.
    pub const ALL: [TaxRate; 5] = [
        TaxRate::Zero,
        TaxRate::Five,
        TaxRate::Twelve,
        TaxRate::Eighteen,
        TaxRate::TwentyEight,
    ];

    /// Rate given to freshly added lines.
    pub const DEFAULT: TaxRate = TaxRate::Eighteen;

    pub fn as_u8(self) -> u8 {
        match self {
            TaxRate::Zero => 0,
            TaxRate::Five => 5,
            TaxRate::Twelve => 12,
            TaxRate::Eighteen => 18,
            TaxRate::TwentyEight => 28,
        }
    }

    /// The rate as a percentage (18% is `18`, not `0.18`).
    pub fn percent(self) -> Decimal {
        Decimal::from(self.as_u8())
    }

    /// Look up the slab matching a parsed percentage, if any.
    pub fn from_percent(percent: Decimal) -> Option<TaxRate> {
        Self::ALL.into_iter().find(|rate| rate.percent() == percent)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ValueObject for TaxRate {}

impl From<TaxRate> for u8 {
    fn from(rate: TaxRate) -> Self {
        rate.as_u8()
    }
}

impl TryFrom<u8> for TaxRate {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_percent(Decimal::from(value))
            .ok_or_else(|| DomainError::validation(format!("unsupported tax rate: {value}%")))
    }
}

impl core::fmt::Display for TaxRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(&format!("{}%", self.as_u8()))
    }
}

/// Editable field of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum LineField {
    Description,
    Quantity,
    UnitPrice,
    TaxRate,
}

impl FromStr for LineField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "description" => Ok(LineField::Description),
            "quantity" => Ok(LineField::Quantity),
            "unitPrice" | "unit_price" => Ok(LineField::UnitPrice),
            "taxRate" | "tax_rate" | "gstRate" => Ok(LineField::TaxRate),
            other => Err(DomainError::unknown_field(other)),
        }
    }
}

impl TryFrom<String> for LineField {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One billable row of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: LineItemId,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub tax_rate: TaxRate,
}

impl LineItem {
    /// A fresh row: no description, quantity 1, price 0, default rate.
    pub fn blank(id: LineItemId) -> Self {
        Self {
            id,
            description: String::new(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            tax_rate: TaxRate::DEFAULT,
        }
    }

    /// Whether this row may appear on a finalized invoice.
    pub fn is_complete(&self) -> bool {
        !self.description.trim().is_empty()
            && self.quantity > Decimal::ZERO
            && self.unit_price > Decimal::ZERO
    }

    /// Store raw user input into `field`.
    ///
    /// Descriptions are kept verbatim; numeric fields go through
    /// [`parse_numeric_field`], so unusable input becomes zero. A tax rate
    /// outside the fixed slabs becomes [`TaxRate::Zero`].
    pub fn set_field(&mut self, field: LineField, raw: &str) {
        match field {
            LineField::Description => self.description = raw.to_string(),
            LineField::Quantity => self.quantity = parse_numeric_field(raw),
            LineField::UnitPrice => self.unit_price = parse_numeric_field(raw),
            LineField::TaxRate => {
                let percent = parse_numeric_field(raw);
                self.tax_rate = TaxRate::from_percent(percent).unwrap_or_else(|| {
                    tracing::debug!(line = %self.id, %percent, "unsupported tax rate coerced to 0%");
                    TaxRate::Zero
                });
            }
        }
    }
}

impl Entity for LineItem {
    type Id = LineItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Read a number out of free-form form input.
///
/// This never fails. Surrounding whitespace is ignored and the longest
/// leading decimal literal is used (`"12abc"` reads as 12, `"1e3"` as 1000);
/// input with no leading number, or one outside the decimal range, reads as
/// zero. Malformed numbers are silently corrected, not reported.
pub fn parse_numeric_field(raw: &str) -> Decimal {
    match leading_decimal(raw.trim()) {
        Some(value) => value,
        None => {
            tracing::debug!(input = raw, "numeric input coerced to zero");
            Decimal::ZERO
        }
    }
}

// Exponents beyond this cannot produce a representable non-zero decimal.
const MAX_EXPONENT: i64 = 64;

fn leading_decimal(text: &str) -> Option<Decimal> {
    let bytes = text.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &text[int_start..pos];

    let mut frac_digits = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &text[frac_start..end];
        pos = end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent: i64 = 0;
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut end = pos + 1;
        let exp_negative = match bytes.get(end) {
            Some(b'-') => {
                end += 1;
                true
            }
            Some(b'+') => {
                end += 1;
                false
            }
            _ => false,
        };
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        // "2e" or "2e-" keeps only the mantissa.
        if end > digits_start {
            let magnitude = text[digits_start..end].parse::<i64>().unwrap_or(i64::MAX);
            exponent = if exp_negative { -magnitude } else { magnitude };
        }
    }

    let int_part = if int_digits.is_empty() { "0" } else { int_digits };
    let literal = if frac_digits.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_digits}")
    };
    let mut value = Decimal::from_str(&literal).ok()?;

    if value.is_zero() {
        return Some(Decimal::ZERO);
    }

    if exponent > MAX_EXPONENT {
        return None;
    }
    if exponent < -MAX_EXPONENT {
        return Some(Decimal::ZERO);
    }
    for _ in 0..exponent.unsigned_abs() {
        value = if exponent > 0 {
            value.checked_mul(Decimal::TEN)?
        } else {
            value.checked_div(Decimal::TEN)?
        };
    }

    if value.is_zero() {
        Some(Decimal::ZERO)
    } else if negative {
        Some(-value.normalize())
    } else {
        Some(value.normalize())
    }
}
