//! Cache key builders.
//!
//! Backends may add their own prefix (see `cache.redis.key_prefix`).

/// Key holding the pending password-reset code for an email.
pub fn verification_code(email: &str) -> String {
    format!("verify:{}", email.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_key_normalizes_email() {
        assert_eq!(verification_code(" A@X.com"), "verify:a@x.com");
    }
}
