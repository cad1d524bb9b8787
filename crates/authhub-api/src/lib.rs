//! # authhub-api
//!
//! HTTP API layer for AuthHub built on Axum.
//!
//! Provides the REST endpoints, the auth gate and RBAC middleware,
//! extractors, DTOs, and the mapping from [`AppError`] to HTTP responses.
//!
//! [`AppError`]: authhub_core::error::AppError

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::{AppState, StateBuilder};
