//! Generic CRUD controller.
//!
//! # Responsibility
//! - Map each `CrudService` operation to one HTTP verb and route.
//! - Translate `RepoError::NotFound` into `404 Not Found`.
//!
//! # Invariants
//! - Successful reads and creates answer `200` with a JSON body.
//! - Successful updates and deletes answer `200` with an empty body.
//! - Any other service failure answers `500` with an empty body.
//! - Service calls are synchronous and run on tokio's blocking pool, never
//!   on an async worker thread.

use crate::response::ActionResult;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use generic_crud_core::{CrudService, Entity, EntityId, RepoError, RepoResult};
use log::{debug, error};
use std::marker::PhantomData;
use std::sync::Arc;

/// HTTP-facing handler set for one entity type.
pub struct CrudController<T, S> {
    service: Arc<S>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, S> CrudController<T, S>
where
    T: Entity,
    S: CrudService<T> + 'static,
{
    pub fn new(service: S) -> Self {
        Self::from_shared(Arc::new(service))
    }

    /// Builds a controller over a service that other owners also hold.
    pub fn from_shared(service: Arc<S>) -> Self {
        Self {
            service,
            _entity: PhantomData,
        }
    }

    /// `GET /{name}`
    pub fn get_all(&self) -> ActionResult<Vec<T>> {
        respond(T::ENTITY_NAME, "get_all", self.service.get_all(), ActionResult::Ok)
    }

    /// `GET /{name}/{id}`
    pub fn get_by_id(&self, id: EntityId) -> ActionResult<T> {
        respond(T::ENTITY_NAME, "get_by_id", self.service.get_by_id(id), ActionResult::Ok)
    }

    /// `POST /{name}`
    pub fn create(&self, entity: T) -> ActionResult<T> {
        respond(T::ENTITY_NAME, "create", self.service.create(entity), ActionResult::Ok)
    }

    /// `PUT /{name}/{id}`
    pub fn update(&self, id: EntityId, entity: T) -> ActionResult<()> {
        respond(
            T::ENTITY_NAME,
            "update",
            self.service.update(id, entity),
            |()| ActionResult::OkEmpty,
        )
    }

    /// `DELETE /{name}/{id}`
    pub fn delete(&self, id: EntityId) -> ActionResult<()> {
        respond(
            T::ENTITY_NAME,
            "delete",
            self.service.delete(id),
            |()| ActionResult::OkEmpty,
        )
    }

    /// Collection route, e.g. `/accounts`.
    pub fn collection_path() -> String {
        format!("/{}", T::ENTITY_NAME)
    }

    /// Member route template, e.g. `/accounts/{id}`.
    pub fn member_path() -> String {
        format!("/{}/{{id}}", T::ENTITY_NAME)
    }

    /// Consumes the controller into a router serving all five endpoints.
    pub fn routes(self) -> Router {
        Router::new()
            .route(
                &Self::collection_path(),
                get(list_handler::<T, S>).post(create_handler::<T, S>),
            )
            .route(
                &Self::member_path(),
                get(get_handler::<T, S>)
                    .put(update_handler::<T, S>)
                    .delete(delete_handler::<T, S>),
            )
            .with_state(Arc::new(self))
    }
}

/// Builds the CRUD router for `T` directly from a service.
pub fn crud_router<T, S>(service: S) -> Router
where
    T: Entity,
    S: CrudService<T> + 'static,
{
    CrudController::<T, S>::new(service).routes()
}

fn respond<B, V, F>(
    entity: &'static str,
    op: &'static str,
    result: RepoResult<V>,
    on_ok: F,
) -> ActionResult<B>
where
    F: FnOnce(V) -> ActionResult<B>,
{
    match result {
        Ok(value) => {
            debug!("event=crud_request module=http entity={entity} op={op} status=ok");
            on_ok(value)
        }
        Err(RepoError::NotFound(id)) => {
            debug!(
                "event=crud_request module=http entity={entity} op={op} status=not_found id={id}"
            );
            ActionResult::NotFound
        }
        Err(err) => {
            error!(
                "event=crud_request module=http entity={entity} op={op} status=error error={err}"
            );
            ActionResult::InternalError
        }
    }
}

type Shared<T, S> = State<Arc<CrudController<T, S>>>;

/// Runs one synchronous controller action on the blocking pool.
async fn run_blocking<B, F>(op: &'static str, action: F) -> ActionResult<B>
where
    B: Send + 'static,
    F: FnOnce() -> ActionResult<B> + Send + 'static,
{
    match tokio::task::spawn_blocking(action).await {
        Ok(result) => result,
        Err(err) => {
            error!("event=crud_request module=http op={op} status=error error={err}");
            ActionResult::InternalError
        }
    }
}

async fn list_handler<T, S>(State(controller): Shared<T, S>) -> ActionResult<Vec<T>>
where
    T: Entity,
    S: CrudService<T> + 'static,
{
    run_blocking("get_all", move || controller.get_all()).await
}

async fn get_handler<T, S>(
    State(controller): Shared<T, S>,
    Path(id): Path<EntityId>,
) -> ActionResult<T>
where
    T: Entity,
    S: CrudService<T> + 'static,
{
    run_blocking("get_by_id", move || controller.get_by_id(id)).await
}

async fn create_handler<T, S>(
    State(controller): Shared<T, S>,
    Json(entity): Json<T>,
) -> ActionResult<T>
where
    T: Entity,
    S: CrudService<T> + 'static,
{
    run_blocking("create", move || controller.create(entity)).await
}

async fn update_handler<T, S>(
    State(controller): Shared<T, S>,
    Path(id): Path<EntityId>,
    Json(entity): Json<T>,
) -> ActionResult<()>
where
    T: Entity,
    S: CrudService<T> + 'static,
{
    run_blocking("update", move || controller.update(id, entity)).await
}

async fn delete_handler<T, S>(
    State(controller): Shared<T, S>,
    Path(id): Path<EntityId>,
) -> ActionResult<()>
where
    T: Entity,
    S: CrudService<T> + 'static,
{
    run_blocking("delete", move || controller.delete(id)).await
}

#[cfg(test)]
mod tests {
    use super::{delete_handler, list_handler, CrudController};
    use crate::response::ActionResult;
    use generic_crud_core::{CrudService, Entity, EntityId, RepoError, RepoResult};
    use serde::{Deserialize, Serialize};
    use axum::extract::{Path, State};
    use std::sync::{Arc, Mutex};
    use std::thread::{self, ThreadId};
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct TestEntity {
        id: EntityId,
        value: String,
    }

    impl TestEntity {
        fn new(value: &str) -> Self {
            Self {
                id: Uuid::new_v4(),
                value: value.to_string(),
            }
        }
    }

    impl Entity for TestEntity {
        const ENTITY_NAME: &'static str = "tests";

        fn id(&self) -> EntityId {
            self.id
        }

        fn set_id(&mut self, id: EntityId) {
            self.id = id;
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Outcome {
        Succeed,
        NotFound,
        Broken,
    }

    /// Records every call and answers with a scripted outcome.
    struct RecordingService {
        entities: Vec<TestEntity>,
        outcome: Outcome,
        calls: Mutex<Vec<&'static str>>,
        threads: Mutex<Vec<ThreadId>>,
    }

    impl RecordingService {
        fn new(entities: Vec<TestEntity>, outcome: Outcome) -> Self {
            Self {
                entities,
                outcome,
                calls: Mutex::new(Vec::new()),
                threads: Mutex::new(Vec::new()),
            }
        }

        fn record<V>(&self, op: &'static str, id: EntityId, value: V) -> RepoResult<V> {
            self.calls.lock().unwrap().push(op);
            self.threads.lock().unwrap().push(thread::current().id());
            match self.outcome {
                Outcome::Succeed => Ok(value),
                Outcome::NotFound => Err(RepoError::NotFound(id)),
                Outcome::Broken => Err(RepoError::InvalidData("broken store".to_string())),
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CrudService<TestEntity> for RecordingService {
        fn get_all(&self) -> RepoResult<Vec<TestEntity>> {
            self.record("get_all", Uuid::nil(), self.entities.clone())
        }

        fn get_by_id(&self, id: EntityId) -> RepoResult<TestEntity> {
            let found = self
                .entities
                .iter()
                .find(|entity| entity.id == id)
                .cloned()
                .unwrap_or_else(|| TestEntity::new("fallback"));
            self.record("get_by_id", id, found)
        }

        fn create(&self, entity: TestEntity) -> RepoResult<TestEntity> {
            self.record("create", entity.id, entity)
        }

        fn update(&self, id: EntityId, _entity: TestEntity) -> RepoResult<()> {
            self.record("update", id, ())
        }

        fn delete(&self, id: EntityId) -> RepoResult<()> {
            self.record("delete", id, ())
        }
    }

    fn sample_entities() -> Vec<TestEntity> {
        ["lorem", "ipsum", "dolor", "sit", "amet"]
            .into_iter()
            .map(TestEntity::new)
            .collect()
    }

    fn controller(
        outcome: Outcome,
    ) -> (
        CrudController<TestEntity, Arc<RecordingService>>,
        Arc<RecordingService>,
    ) {
        let service = Arc::new(RecordingService::new(sample_entities(), outcome));
        (CrudController::new(service.clone()), service)
    }

    #[test]
    fn get_all_returns_ok_with_every_entity() {
        let (controller, service) = controller(Outcome::Succeed);

        match controller.get_all() {
            ActionResult::Ok(entities) => assert_eq!(entities.len(), 5),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(service.calls(), vec!["get_all"]);
    }

    #[test]
    fn get_by_id_returns_ok_with_entity() {
        let (controller, service) = controller(Outcome::Succeed);
        let id = service.entities[0].id;

        match controller.get_by_id(id) {
            ActionResult::Ok(entity) => assert_eq!(entity.id, id),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(service.calls(), vec!["get_by_id"]);
    }

    #[test]
    fn get_by_id_returns_not_found() {
        let (controller, service) = controller(Outcome::NotFound);

        assert_eq!(controller.get_by_id(Uuid::new_v4()), ActionResult::NotFound);
        assert_eq!(service.calls(), vec!["get_by_id"]);
    }

    #[test]
    fn create_returns_created_entity() {
        let (controller, service) = controller(Outcome::Succeed);
        let entity = TestEntity::new("fresh");

        assert_eq!(controller.create(entity.clone()), ActionResult::Ok(entity));
        assert_eq!(service.calls(), vec!["create"]);
    }

    #[test]
    fn update_returns_empty_ok() {
        let (controller, service) = controller(Outcome::Succeed);
        let entity = TestEntity::new("changed");

        assert_eq!(controller.update(entity.id, entity), ActionResult::OkEmpty);
        assert_eq!(service.calls(), vec!["update"]);
    }

    #[test]
    fn update_returns_not_found() {
        let (controller, service) = controller(Outcome::NotFound);
        let entity = TestEntity::new("missing");

        assert_eq!(controller.update(entity.id, entity), ActionResult::NotFound);
        assert_eq!(service.calls(), vec!["update"]);
    }

    #[test]
    fn delete_returns_empty_ok() {
        let (controller, service) = controller(Outcome::Succeed);

        assert_eq!(controller.delete(Uuid::new_v4()), ActionResult::OkEmpty);
        assert_eq!(service.calls(), vec!["delete"]);
    }

    #[test]
    fn delete_returns_not_found() {
        let (controller, service) = controller(Outcome::NotFound);

        assert_eq!(controller.delete(Uuid::new_v4()), ActionResult::NotFound);
        assert_eq!(service.calls(), vec!["delete"]);
    }

    #[test]
    fn other_service_failures_become_internal_errors() {
        let (controller, _service) = controller(Outcome::Broken);

        assert_eq!(controller.get_all(), ActionResult::InternalError);
        assert_eq!(controller.delete(Uuid::new_v4()), ActionResult::InternalError);
    }

    #[test]
    fn routes_are_derived_from_entity_name() {
        type Controller = CrudController<TestEntity, Arc<RecordingService>>;
        assert_eq!(Controller::collection_path(), "/tests");
        assert_eq!(Controller::member_path(), "/tests/{id}");
    }

    #[tokio::test]
    async fn handlers_run_service_calls_off_the_async_thread() {
        let (controller, service) = controller(Outcome::Succeed);
        let controller = Arc::new(controller);
        let async_thread = thread::current().id();

        let listed = list_handler(State(controller.clone())).await;
        assert!(matches!(listed, ActionResult::Ok(entities) if entities.len() == 5));
        let deleted = delete_handler(State(controller), Path(Uuid::new_v4())).await;
        assert_eq!(deleted, ActionResult::OkEmpty);

        assert_eq!(service.calls(), vec!["get_all", "delete"]);
        let threads = service.threads.lock().unwrap().clone();
        assert!(threads.iter().all(|id| *id != async_thread));
    }
}
