//! # authhub-service
//!
//! Business logic service layer for AuthHub. Each service orchestrates
//! the stores, the token machinery and the code cache to implement one
//! group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod credentials;
pub mod sender;
pub mod user;

#[cfg(test)]
mod testing;

pub use auth::{AuthService, RecoveryService};
pub use context::RequestContext;
pub use credentials::{CredentialStore, Registration};
pub use sender::{CodeSender, LogCodeSender};
pub use user::{AdminService, UserService};
