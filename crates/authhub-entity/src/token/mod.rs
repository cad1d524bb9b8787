//! Session token records.

pub mod model;

pub use model::{AccessTokenRecord, RefreshTokenRecord};
