//! Bearer credential for the upstream API
//!
//! The key is read once at startup and attached to every upstream call. It is
//! zeroized on drop and never printed through `Debug`.

use zeroize::Zeroize;

use crate::core::error::{Error, Result};

/// API key sent as `Authorization: Bearer <key>`
#[derive(Clone)]
pub struct ApiKey {
    value: String,
}

impl ApiKey {
    /// Create a new key, rejecting values that cannot be sent as a header
    pub fn new<S: Into<String>>(value: S) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(Error::config("API key cannot be empty"));
        }
        if trimmed.chars().any(|c| c.is_control()) {
            return Err(Error::config("API key contains control characters"));
        }

        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Get the key value (limited access)
    pub fn expose_secret(&self) -> &str {
        &self.value
    }

    /// Value of the `Authorization` header for this key
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey").field("value", &"***").finish()
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}
