use std::fmt;

use thiserror::Error;

/// Opaque external key assigned at provisioning. The registration flow
/// never mints or rewrites these, it only looks records up by them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueId(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UniqueIdError {
    #[error("uniqueId is required")]
    Empty,
}

impl UniqueId {
    pub fn parse(raw: String) -> Result<Self, UniqueIdError> {
        if raw.trim().is_empty() {
            return Err(UniqueIdError::Empty);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
