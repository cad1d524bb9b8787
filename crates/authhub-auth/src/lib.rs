//! # authhub-auth
//!
//! Authentication and authorization building blocks for AuthHub.
//!
//! ## Modules
//!
//! - `jwt`: dual-secret HS256 access and refresh tokens
//! - `password`: Argon2id hashing and the password policy
//! - `rbac`: `(role, path, method)` policy enforcement
//! - `gate`: per-request validation of an access/refresh pair
//! - `session`: issuing, renewing, closing and sweeping token pairs

pub mod gate;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;

pub use gate::{AuthGate, AuthSession};
pub use jwt::{Claims, TokenCodec, TokenError, TokenKind, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::RbacEnforcer;
pub use session::{SessionIssuer, SessionSweeper};
