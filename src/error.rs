use thiserror::Error;

/// Error type for precondition violations detected before diffing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// Two elements of one input share an identifier. Diffing such a
    /// sequence is a programming error: identity must be unique within a
    /// side (and, for sectioned collections, across the flattened item set).
    #[error(
        "duplicate identifier {id} in {container}: identifiers must be unique within the \
         sequence being diffed"
    )]
    DuplicateId {
        /// Which input holds the duplicate, e.g. `"before"` or `"after items"`.
        container: String,
        /// Debug rendering of the offending identifier.
        id: String,
    },
}
