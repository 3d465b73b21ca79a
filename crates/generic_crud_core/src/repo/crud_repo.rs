//! Generic CRUD repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/update/delete/list over any `Entity` type.
//! - Keep SQL and JSON document details inside the persistence boundary.
//!
//! # Invariants
//! - Rows are partitioned by `T::ENTITY_NAME`; one entity type never reads
//!   another type's rows.
//! - The stored identity of a row never changes after insert.

use crate::db::{DbContext, DbError};
use crate::model::entity::{Entity, EntityId};
use rusqlite::{params, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entity persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// No entity with this identifier exists for the requested type.
    NotFound(EntityId),
    Db(DbError),
    Serialization(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "entity not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "entity serialization failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entity data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl RepoError {
    /// Returns whether this error is the not-found outcome of an id lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Repository interface for CRUD operations over one entity type.
pub trait CrudRepository<T: Entity> {
    fn get_all(&self) -> RepoResult<Vec<T>>;
    fn get_by_id(&self, id: EntityId) -> RepoResult<T>;
    /// Stores `entity`, assigning an identifier when it has none.
    fn create(&self, entity: T) -> RepoResult<T>;
    /// Replaces the stored fields of `id`; the body's own id is ignored.
    fn update(&self, id: EntityId, entity: T) -> RepoResult<()>;
    fn delete(&self, id: EntityId) -> RepoResult<()>;
}

/// SQLite-backed repository storing entities as JSON documents.
pub struct SqliteCrudRepository<T> {
    db: DbContext,
    _entity: PhantomData<fn() -> T>,
}

impl<T> SqliteCrudRepository<T> {
    pub fn new(db: DbContext) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

impl<T> Clone for SqliteCrudRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

impl<T: Entity> CrudRepository<T> for SqliteCrudRepository<T> {
    fn get_all(&self) -> RepoResult<Vec<T>> {
        let conn = self.db.lock();
        let mut stmt = conn.prepare(
            "SELECT id, body
             FROM entities
             WHERE entity_type = ?1
             ORDER BY created_at ASC, rowid ASC;",
        )?;
        let mut rows = stmt.query([T::ENTITY_NAME])?;
        let mut entities = Vec::new();

        while let Some(row) = rows.next()? {
            let id: String = row.get("id")?;
            let body: String = row.get("body")?;
            entities.push(parse_entity::<T>(&id, &body)?);
        }

        Ok(entities)
    }

    fn get_by_id(&self, id: EntityId) -> RepoResult<T> {
        let body = self
            .db
            .lock()
            .query_row(
                "SELECT body FROM entities WHERE entity_type = ?1 AND id = ?2;",
                params![T::ENTITY_NAME, id.to_string()],
                |row| row.get::<_, String>(0),
            )
            .optional()?
            .ok_or(RepoError::NotFound(id))?;

        parse_entity::<T>(&id.to_string(), &body)
    }

    fn create(&self, mut entity: T) -> RepoResult<T> {
        let id = entity.ensure_id();
        let body = serde_json::to_string(&entity)?;

        self.db.lock().execute(
            "INSERT INTO entities (entity_type, id, body) VALUES (?1, ?2, ?3);",
            params![T::ENTITY_NAME, id.to_string(), body],
        )?;

        Ok(entity)
    }

    fn update(&self, id: EntityId, mut entity: T) -> RepoResult<()> {
        entity.set_id(id);
        let body = serde_json::to_string(&entity)?;

        let changed = self.db.lock().execute(
            "UPDATE entities
             SET
                body = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE entity_type = ?2 AND id = ?3;",
            params![body, T::ENTITY_NAME, id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        let changed = self.db.lock().execute(
            "DELETE FROM entities WHERE entity_type = ?1 AND id = ?2;",
            params![T::ENTITY_NAME, id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_entity<T: Entity>(id_text: &str, body: &str) -> RepoResult<T> {
    let id = Uuid::parse_str(id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in entities.id"))
    })?;

    let mut entity: T = serde_json::from_str(body).map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid {} body for `{id}` in entities.body: {err}",
            T::ENTITY_NAME
        ))
    })?;
    // Column is authoritative over whatever id the JSON document carries.
    entity.set_id(id);
    Ok(entity)
}
