//! Generic CRUD core: entity contract, persistence context, repository and
//! service layers shared by every entity type.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbContext, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::entity::{Entity, EntityId};
pub use repo::crud_repo::{CrudRepository, RepoError, RepoResult, SqliteCrudRepository};
pub use service::crud_service::{CrudService, DefaultCrudService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
