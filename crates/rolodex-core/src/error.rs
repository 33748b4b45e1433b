use thiserror::Error;

/// Error taxonomy shared by [`Directory`](crate::Directory) and
/// [`SubList`](crate::SubList) mutations.
///
/// Every condition is recoverable and reported to the caller; nothing here
/// aborts, and no operation retries on its own.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryError {
    /// Insert found the entry already contained in the directory.
    #[error("entry already exists in the directory")]
    DuplicateKey,
    /// Edit, delete, or sub-entry operation missed its target.
    #[error("entry not found")]
    NotFound,
    /// Delete attempted on an empty collection.
    #[error("collection is empty")]
    EmptyCollection,
}
