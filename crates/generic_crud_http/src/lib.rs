//! HTTP surface for the generic CRUD core.
//!
//! One `CrudController` per entity type mounts five routes under
//! `/{ENTITY_NAME}`; routers for several entity types merge with
//! `Router::merge`.

pub mod controller;
pub mod response;

pub use controller::{crud_router, CrudController};
pub use response::ActionResult;
