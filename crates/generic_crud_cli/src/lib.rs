//! Sample host wiring for the generic CRUD stack.
//!
//! # Responsibility
//! - Define the sample `Account` entity.
//! - Assemble persistence context, repository, service and controller into
//!   one HTTP router.

use axum::routing::get;
use axum::{Json, Router};
use generic_crud_core::{
    core_version, DbContext, DefaultCrudService, Entity, EntityId, SqliteCrudRepository,
};
use generic_crud_http::crud_router;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sample entity served under `/accounts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default = "Uuid::nil")]
    pub id: EntityId,
    pub name: String,
}

impl Account {
    /// Creates an account with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Entity for Account {
    const ENTITY_NAME: &'static str = "accounts";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: core_version().to_string(),
    })
}

/// Builds the full HTTP router over one persistence context.
pub fn build_app(db: DbContext) -> Router {
    let accounts = DefaultCrudService::<Account, _>::new(SqliteCrudRepository::new(db));

    Router::new()
        .route("/health", get(health_handler))
        .merge(crud_router::<Account, _>(accounts))
}
