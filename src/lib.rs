//! # linked-bst
//!
//! An unbalanced binary search tree built from triple-linked nodes.
//!
//! ## Overview
//!
//! Every node owns its two children and keeps a weak back-reference to its
//! parent, which makes upward navigation (successor, predecessor, splicing)
//! cheap without ever creating an ownership cycle.
//!
//! - [`TreeNode`]: a node handle with invariant-preserving child setters and
//!   a bracketed structural rendering
//! - [`BinarySearchTree`]: insertion, deletion, search, min/max,
//!   successor/predecessor and clearing over [`TreeNode`]s
//! - [`InOrder`], [`PreOrder`]: iterators over node handles
//! - [`TreeError`]: why a mutation was refused
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`BinarySearchTree`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use linked_bst::prelude::*;
//!
//! let mut tree = BinarySearchTree::new();
//! for value in [20, 10, 30, 15, 14, 5, 16] {
//!     tree.insert(value).unwrap();
//! }
//! assert_eq!(tree.to_string(), "20( 10( 5 , 15( 14 , 16 ) ) , 30 )");
//! assert_eq!(tree.remove(None), Err(TreeError::MissingValue));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use linked_bst::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::TreeError;
    pub use crate::node::{Side, TreeNode};
    pub use crate::traversal::{InOrder, PreOrder};
    pub use crate::tree::BinarySearchTree;
}

mod error;
mod node;
mod traversal;
mod tree;

pub use error::TreeError;
pub use node::{Side, TreeNode};
pub use traversal::{InOrder, PreOrder};
pub use tree::BinarySearchTree;
