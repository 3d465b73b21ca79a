//! Entity contract shared by every CRUD layer.
//!
//! # Invariants
//! - Every entity is identified by a stable `EntityId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod entity;
