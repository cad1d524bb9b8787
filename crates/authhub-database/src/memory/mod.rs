//! In-process stores for development and tests.
//!
//! Each store guards its tables with a single lock, so multi-row
//! operations are atomic the way a database transaction would be.

pub mod token;
pub mod user;

pub use token::MemorySessionRegistry;
pub use user::MemoryUserStore;
