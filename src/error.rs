use std::fmt;

use crate::store::StoreError;

/// Everything a circulation operation can fail with.
///
/// Every variant is recoverable: the caller corrects its input or retries,
/// and the engine stays usable after any single failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A required input field was blank. Carries the first blank field
    /// found, in the fixed validation order.
    Validation { field: &'static str },
    /// The referenced book or active loan does not exist. Carries the
    /// reference that failed to resolve.
    NotFound(String),
    /// An add used a book id that is already in the catalog.
    DuplicateId(String),
    /// A borrow targeted a book whose availability flag is already down.
    AlreadyBorrowed(String),
    /// The persistence medium failed; in-memory state is untouched and a
    /// retry is safe.
    Store(StoreError),
    LockPoisoned(&'static str),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Validation { field } => {
                write!(f, "the '{}' field is required", field)
            }
            EngineError::NotFound(reference) => {
                write!(f, "no record found for '{}'", reference)
            }
            EngineError::DuplicateId(id) => {
                write!(f, "book id '{}' already exists", id)
            }
            EngineError::AlreadyBorrowed(id) => {
                write!(f, "book '{}' is already borrowed", id)
            }
            EngineError::Store(err) => write!(f, "store error: {}", err),
            EngineError::LockPoisoned(operation) => {
                write!(f, "engine lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        EngineError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_convert() {
        let err: EngineError = StoreError::Io("disk gone".to_string()).into();
        assert_eq!(
            err,
            EngineError::Store(StoreError::Io("disk gone".to_string()))
        );
    }

    #[test]
    fn display_names_the_blank_field() {
        let err = EngineError::Validation { field: "first name" };
        assert_eq!(err.to_string(), "the 'first name' field is required");
    }
}
