//! JWT issuance and verification with separate access and refresh secrets.

pub mod claims;
pub mod codec;
pub mod error;

pub use claims::{Claims, TokenKind};
pub use codec::{TokenCodec, TokenPair};
pub use error::TokenError;
