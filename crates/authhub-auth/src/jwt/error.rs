//! Typed token verification failures.

use thiserror::Error;

use authhub_core::error::{AppError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind as Jwt;
        match e.kind() {
            Jwt::ExpiredSignature => Self::Expired,
            Jwt::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        AppError::with_source(ErrorKind::Authentication, "Invalid token provided", e)
    }
}
