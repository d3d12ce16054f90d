//! Value object trait: equality by value, not identity.
//!
//! Tax rates, customer details and computed totals carry no identity of
//! their own. Two customer records with the same fields are the same
//! customer as far as an invoice is concerned.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (`TaxRate::Eighteen` is equal to any other
///   `TaxRate::Eighteen`)
/// - **Entity**: has identity (a line item with id 3 stays line 3 while its
///   fields are edited)
///
/// To "modify" a value object inside a finalized record, build a new record.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Totals {
///     subtotal: Decimal,
///     tax_total: Decimal,
/// }
///
/// impl ValueObject for Totals {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
