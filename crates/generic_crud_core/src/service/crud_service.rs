//! Generic CRUD service.
//!
//! # Responsibility
//! - Expose the repository contract behind a trait that callers can replace
//!   with test doubles.
//!
//! # Invariants
//! - `DefaultCrudService` adds no behavior; results and errors pass through
//!   unchanged.

use crate::model::entity::{Entity, EntityId};
use crate::repo::crud_repo::{CrudRepository, RepoResult};
use std::marker::PhantomData;
use std::sync::Arc;

/// Service interface for CRUD operations over one entity type.
pub trait CrudService<T: Entity>: Send + Sync {
    fn get_all(&self) -> RepoResult<Vec<T>>;
    fn get_by_id(&self, id: EntityId) -> RepoResult<T>;
    fn create(&self, entity: T) -> RepoResult<T>;
    fn update(&self, id: EntityId, entity: T) -> RepoResult<()>;
    fn delete(&self, id: EntityId) -> RepoResult<()>;
}

/// Pass-through service over a repository implementation.
pub struct DefaultCrudService<T, R> {
    repo: R,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity, R: CrudRepository<T>> DefaultCrudService<T, R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _entity: PhantomData,
        }
    }
}

impl<T, R> CrudService<T> for DefaultCrudService<T, R>
where
    T: Entity,
    R: CrudRepository<T> + Send + Sync,
{
    fn get_all(&self) -> RepoResult<Vec<T>> {
        self.repo.get_all()
    }

    fn get_by_id(&self, id: EntityId) -> RepoResult<T> {
        self.repo.get_by_id(id)
    }

    fn create(&self, entity: T) -> RepoResult<T> {
        self.repo.create(entity)
    }

    fn update(&self, id: EntityId, entity: T) -> RepoResult<()> {
        self.repo.update(id, entity)
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        self.repo.delete(id)
    }
}

impl<T: Entity, S: CrudService<T> + ?Sized> CrudService<T> for Arc<S> {
    fn get_all(&self) -> RepoResult<Vec<T>> {
        (**self).get_all()
    }

    fn get_by_id(&self, id: EntityId) -> RepoResult<T> {
        (**self).get_by_id(id)
    }

    fn create(&self, entity: T) -> RepoResult<T> {
        (**self).create(entity)
    }

    fn update(&self, id: EntityId, entity: T) -> RepoResult<()> {
        (**self).update(id, entity)
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        (**self).delete(id)
    }
}
