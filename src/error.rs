//! Errors returned by tree operations.

use thiserror::Error;

/// Tree error
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum TreeError {
    /// The requested item is not stored in the tree.
    #[error("item not in tree")]
    NotFound,
}
