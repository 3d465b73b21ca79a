//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the generic CRUD data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Identifier lookups that miss return `RepoError::NotFound`, never an
//!   empty success.

pub mod crud_repo;
