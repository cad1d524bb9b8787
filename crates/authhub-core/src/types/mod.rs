//! Core type definitions used across the AuthHub workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
