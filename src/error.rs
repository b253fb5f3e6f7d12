//! Error types for tree mutations.
//!
//! Lookups report a miss with `None`; only the mutating operations that can
//! refuse their input return a [`TreeError`].

/// Represents the reasons a tree mutation can be refused.
///
/// A refused mutation never changes the tree.
///
/// # Examples
///
/// ```rust
/// use linked_bst::{BinarySearchTree, TreeError};
///
/// let mut tree = BinarySearchTree::new();
/// assert_eq!(tree.insert(None), Err(TreeError::MissingValue));
/// assert_eq!(tree.remove(&7), Err(TreeError::NotFound));
/// assert_eq!(format!("{}", TreeError::NotFound), "value not found in tree");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeError {
    /// An absent value was passed where a value is required.
    MissingValue,
    /// No node holds the requested value.
    NotFound,
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue => write!(formatter, "an absent value cannot be stored or removed"),
            Self::NotFound => write!(formatter, "value not found in tree"),
        }
    }
}

impl std::error::Error for TreeError {}
