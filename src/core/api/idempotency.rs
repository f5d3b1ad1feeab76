//! Idempotency keys for mutating upstream calls.

use std::fmt;

use uuid::Uuid;

/// Key sent in the `idempotency-key` header of a mutating request.
///
/// Once provided for an invocation the key never changes: the same value is
/// placed in the outbound header and echoed back in the success payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Use the caller's key verbatim, or generate a random UUID v4 when none
    /// (or an empty one) was supplied.
    pub fn provide(supplied: Option<String>) -> Self {
        match supplied {
            Some(key) if !key.is_empty() => Self(key),
            _ => Self::generate(),
        }
    }

    /// Generate a fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IdempotencyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
