//! Entity trait: objects owned by a catalog and referenced elsewhere by id.

/// Something with a stable identity that other state refers to by handle.
///
/// Two entities with the same id are the same entity, whatever their payload.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
