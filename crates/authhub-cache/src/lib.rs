//! # authhub-cache
//!
//! Short-lived key-value storage for AuthHub. Two backends:
//!
//! - **memory**: In-process cache using [moka](https://crates.io/crates/moka) with per-entry expiry
//! - **redis**: Redis-backed cache using the [redis](https://crates.io/crates/redis) crate
//!
//! The backend is selected at runtime from configuration. On top of it,
//! [`VerificationCodeStore`] keeps password-reset codes keyed by email.

pub mod codes;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use codes::VerificationCodeStore;
pub use provider::CacheManager;
