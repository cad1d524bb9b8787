//! Typed path parameter helpers.

use uuid::Uuid;

use authhub_core::error::AppError;

/// Parse a user id path segment.
pub fn parse_user_id(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::validation("Invalid user ID format"))
}
