//! Identity of editable rows.

/// Something that keeps its identity while its fields change.
///
/// A line item is the canonical case: editing its description or price
/// never changes which row it is.
pub trait Entity {
    type Id: Copy + Eq + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Find the entity with `id` in an ordered collection.
pub fn find_by_id<E: Entity>(entities: &[E], id: E::Id) -> Option<&E> {
    entities.iter().find(|entity| *entity.id() == id)
}

pub fn find_by_id_mut<E: Entity>(entities: &mut [E], id: E::Id) -> Option<&mut E> {
    entities.iter_mut().find(|entity| *entity.id() == id)
}

/// Position of the entity with `id`, if present.
pub fn position_of<E: Entity>(entities: &[E], id: E::Id) -> Option<usize> {
    entities.iter().position(|entity| *entity.id() == id)
}
