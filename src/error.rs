use crate::tag::TypeTag;
use std::fmt;
use thiserror::Error;

/// Errors returned by [`Collection`](crate::Collection) and
/// [`Dictionary`](crate::Dictionary) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value's type differs from the type the collection was locked to
    #[error("invalid element type: collection holds {expected}, got {found}")]
    InvalidElementType { expected: TypeTag, found: TypeTag },
    /// The key or value type differs from the pair the dictionary was locked to
    #[error(
        "invalid key-value type: dictionary holds ({expected_key}, {expected_value}), got ({found_key}, {found_value})"
    )]
    InvalidKeyValueType {
        expected_key: TypeTag,
        expected_value: TypeTag,
        found_key: TypeTag,
        found_value: TypeTag,
    },
    /// An equal element is already stored
    #[error("duplicated element in collection: {0}")]
    DuplicateElement(String),
    /// The key is already stored
    #[error("duplicated key in dictionary: {0}")]
    DuplicateKey(String),
    /// The referenced element or key does not exist
    #[error("element not found: {0}")]
    ElementNotFound(String),
    /// Extraction from an empty container
    #[error("container is empty")]
    EmptyContainer,
    /// A bulk argument could not be read as a sequence of elements
    #[error("non-iterable value can not be converted to a sequence: {0}")]
    InvalidIterableInput(String),
    /// Positional access outside `[0, len)`
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failure while seeding a new container
///
/// Seeding stops at the first failing element. The container built up to that
/// point is kept in `partial`, and the error that stopped it in `source`.
pub struct SeedError<C> {
    pub partial: C,
    pub source: Error,
}

impl<C> SeedError<C> {
    /// Splits the failure into the partially filled container and its error
    pub fn into_parts(self) -> (C, Error) {
        (self.partial, self.source)
    }
}

impl<C> fmt::Debug for SeedError<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SeedError")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<C> fmt::Display for SeedError<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "seeding stopped early: {}", self.source)
    }
}

impl<C> std::error::Error for SeedError<C> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
