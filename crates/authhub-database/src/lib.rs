//! # authhub-database
//!
//! PostgreSQL connection management and the two persistence seams of
//! AuthHub: [`UserStore`] for accounts and [`SessionRegistry`] for issued
//! token pairs. Postgres repositories back production; the `memory`
//! feature provides in-process stores for development and tests.

pub mod connection;
#[cfg(feature = "memory")]
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{SessionRegistry, SessionWindows, SweepReport, UserStore};
