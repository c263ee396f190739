use thiserror::Error;

/// Errors raised while validating client input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing key parameter")]
    EmptyStorageKey,
}
