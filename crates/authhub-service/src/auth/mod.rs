//! Registration, login, session lifecycle and password recovery.

pub mod recovery;
pub mod service;

pub use recovery::RecoveryService;
pub use service::AuthService;
