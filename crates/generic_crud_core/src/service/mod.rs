//! Core use-case services.
//!
//! # Responsibility
//! - Put a substitutable seam between HTTP handlers and repositories.
//! - Keep callers decoupled from storage details.

pub mod crud_service;
