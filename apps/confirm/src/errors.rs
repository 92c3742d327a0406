use thiserror::Error;

use crate::entry::EntryId;
use crate::schema::EntryKind;

/// Controller-level error type.
///
/// These are host or wiring mistakes, never user input problems; user-facing
/// failures are `ValidationFailure`s and end in an alert instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("No {kind:?} entry with id {entry}")]
    UnknownEntry { kind: EntryKind, entry: EntryId },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Form controller must be bound inside a tokio runtime")]
    NoRuntime,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<anyhow::Error> for FormError {
    fn from(err: anyhow::Error) -> Self {
        FormError::Config(format!("{err:#}"))
    }
}
