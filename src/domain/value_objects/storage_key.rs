use crate::domain::errors::ValidationError;

/// Opaque identifier for one blob in the backing bucket.
///
/// Keys carry no schema. The only rule is that they are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyStorageKey);
        }
        Ok(Self(value))
    }

    /// Build a key from an optional request field, treating absence and the
    /// empty string the same way.
    pub fn from_optional(value: Option<String>) -> Result<Self, ValidationError> {
        value
            .ok_or(ValidationError::EmptyStorageKey)
            .and_then(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
