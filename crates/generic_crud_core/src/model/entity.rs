//! Entity capability trait.
//!
//! # Responsibility
//! - Describe what a record type must provide to flow through the generic
//!   repository, service and controller.
//!
//! # Invariants
//! - `id()` is stable for the lifetime of a stored entity.
//! - `ENTITY_NAME` is unique per entity type within one persistence context.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Stable identifier for every stored entity.
pub type EntityId = Uuid;

/// A record type with a unique identifier.
///
/// Implementors are stored as JSON documents, so every field beyond the id is
/// opaque to the CRUD layers.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Storage partition and HTTP route segment, e.g. `accounts`.
    const ENTITY_NAME: &'static str;

    fn id(&self) -> EntityId;

    fn set_id(&mut self, id: EntityId);

    /// Gives the entity a fresh identifier when it does not carry one yet.
    ///
    /// Returns the identifier the entity holds afterwards.
    fn ensure_id(&mut self) -> EntityId {
        if self.id().is_nil() {
            self.set_id(Uuid::new_v4());
        }
        self.id()
    }
}

#[cfg(test)]
mod tests {
    use super::{Entity, EntityId};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Widget {
        id: EntityId,
    }

    impl Entity for Widget {
        const ENTITY_NAME: &'static str = "widgets";

        fn id(&self) -> EntityId {
            self.id
        }

        fn set_id(&mut self, id: EntityId) {
            self.id = id;
        }
    }

    #[test]
    fn ensure_id_assigns_when_nil() {
        let mut widget = Widget { id: Uuid::nil() };
        let assigned = widget.ensure_id();
        assert!(!assigned.is_nil());
        assert_eq!(widget.id, assigned);
    }

    #[test]
    fn ensure_id_keeps_existing_id() {
        let id = Uuid::new_v4();
        let mut widget = Widget { id };
        assert_eq!(widget.ensure_id(), id);
    }
}
