//! # authhub-entity
//!
//! Domain entity models for AuthHub. Database entities derive
//! `sqlx::FromRow`; enums map onto PostgreSQL enum types.

pub mod token;
pub mod user;
