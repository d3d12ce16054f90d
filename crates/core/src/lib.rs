//! `taxform-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the invoice
//! drafting engine (no IO, no presentation concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::{Entity, find_by_id, find_by_id_mut, position_of};
pub use error::{DomainError, DomainResult};
pub use id::{InvoiceRecordId, LineItemId};
pub use value_object::ValueObject;
