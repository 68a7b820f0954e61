//! Identity of server-side records.

/// A resource record the server identifies by id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Implement [`Entity`] for a struct with an `id` field.
#[macro_export]
macro_rules! impl_entity {
    ($t:ty, $id:ty) => {
        impl $crate::Entity for $t {
            type Id = $id;

            fn id(&self) -> &Self::Id {
                &self.id
            }
        }
    };
}
