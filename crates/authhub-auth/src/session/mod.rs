//! Session lifecycle: issuing, renewing and closing token pairs, and the
//! periodic sweep of expired tokens.

pub mod issuer;
pub mod sweeper;

pub use issuer::SessionIssuer;
pub use sweeper::SessionSweeper;
