use serde::Serialize;

use taxform_core::{LineItemId, find_by_id, find_by_id_mut, position_of};

use crate::line_item::{LineField, LineItem};

/// Ordered collection of the line items being edited.
///
/// Invariant: the store is never empty. It starts with one blank line and
/// [`LineItemStore::remove_line`] refuses to drop the last one, so callers
/// never have to guard against an empty invoice body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LineItemStore {
    items: Vec<LineItem>,
}

impl LineItemStore {
    /// A store holding a single blank line with id 1.
    pub fn new() -> Self {
        Self {
            items: vec![LineItem::blank(LineItemId::FIRST)],
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: LineItemId) -> Option<&LineItem> {
        find_by_id(&self.items, id)
    }

    /// Whether a removal would currently be honoured.
    pub fn can_remove(&self) -> bool {
        self.items.len() > 1
    }

    /// The id the next added line will receive (`max + 1`).
    pub fn next_id(&self) -> LineItemId {
        self.items
            .iter()
            .map(|item| item.id)
            .max()
            .map_or(LineItemId::FIRST, LineItemId::next)
    }

    /// Append a blank line and return its id.
    pub fn add_line(&mut self) -> LineItemId {
        let id = self.next_id();
        self.items.push(LineItem::blank(id));
        tracing::debug!(line = %id, lines = self.items.len(), "line added");
        id
    }

    /// Write raw input into one field of the line with `id`.
    ///
    /// Returns `false` (and changes nothing) when no such line exists.
    pub fn update_field(&mut self, id: LineItemId, field: LineField, raw: &str) -> bool {
        match find_by_id_mut(&mut self.items, id) {
            Some(item) => {
                item.set_field(field, raw);
                true
            }
            None => {
                tracing::debug!(line = %id, ?field, "update ignored: unknown line");
                false
            }
        }
    }

    /// Remove the line with `id`, unless it is the only line left.
    ///
    /// Returns whether a line was removed.
    pub fn remove_line(&mut self, id: LineItemId) -> bool {
        if !self.can_remove() {
            tracing::debug!(line = %id, "remove ignored: last remaining line");
            return false;
        }

        match position_of(&self.items, id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => {
                tracing::debug!(line = %id, "remove ignored: unknown line");
                false
            }
        }
    }

    /// Back to a single blank line with id 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for LineItemStore {
    fn default() -> Self {
        Self::new()
    }
}
