//! Controller action results and their HTTP encoding.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Outcome of one controller action, before it becomes an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult<B> {
    /// `200` with `B` serialized as JSON.
    Ok(B),
    /// `200` with an empty body.
    OkEmpty,
    /// `404` with an empty body.
    NotFound,
    /// `500` with an empty body.
    InternalError,
}

impl<B> ActionResult<B> {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Ok(_) | Self::OkEmpty => StatusCode::OK,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<B: Serialize> IntoResponse for ActionResult<B> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(body) => (StatusCode::OK, Json(body)).into_response(),
            other => other.status().into_response(),
        }
    }
}
