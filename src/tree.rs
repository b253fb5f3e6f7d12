//! Unbalanced binary search tree over triple-linked nodes.
//!
//! This module provides [`BinarySearchTree`], an ordered structure that owns
//! a tree of [`TreeNode`]s and keeps it ordered across insertion and
//! deletion.
//!
//! # Overview
//!
//! - O(h) insert, search, remove, min/max, successor and predecessor, where
//!   h is the height of the tree
//! - O(1) len and `is_empty`
//!
//! The tree is never rebalanced, so inserting keys in sorted order builds a
//! chain and h grows to N.
//!
//! # Ordering
//!
//! Every value in the left subtree of a node is strictly less than the
//! node's value, and every value in the right subtree is greater than or
//! equal to it. Equal values are therefore always routed right and come out
//! of an in-order walk in insertion order.
//!
//! # Examples
//!
//! ```rust
//! use linked_bst::BinarySearchTree;
//!
//! let mut tree = BinarySearchTree::new();
//! for value in [20, 10, 30, 15, 14, 5, 16] {
//!     tree.insert(value).unwrap();
//! }
//! assert_eq!(tree.to_string(), "20( 10( 5 , 15( 14 , 16 ) ) , 30 )");
//!
//! assert_eq!(tree.successor(&16).map(|node| *node.value()), Some(20));
//! assert_eq!(tree.predecessor(&14).map(|node| *node.value()), Some(10));
//!
//! tree.remove(&10).unwrap();
//! assert_eq!(tree.to_string(), "20( 14( 5 , 15( - , 16 ) ) , 30 )");
//! ```

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

use crate::error::TreeError;
use crate::node::{STACK_CAPACITY, Side, TreeNode};
use crate::traversal::{InOrder, PreOrder};

/// A node with its inclusive lower bound and exclusive upper bound.
type Bounded<K> = (TreeNode<K>, Option<TreeNode<K>>, Option<TreeNode<K>>);

/// Corresponding positions in two trees compared side by side.
type NodePair<K> = (Option<TreeNode<K>>, Option<TreeNode<K>>);

// =============================================================================
// BinarySearchTree Definition
// =============================================================================

/// An unbalanced binary search tree built from [`TreeNode`]s.
///
/// The tree exclusively owns its root and, through it, every reachable node.
/// Lookups hand out [`TreeNode`] handles that share those nodes.
///
/// Absent inputs are modelled with `Option`: [`insert`](Self::insert) takes
/// anything convertible into `Option<K>`, and the lookups take anything
/// convertible into `Option<&K>`, so both `tree.insert(5)` and
/// `tree.insert(None)` are accepted and the latter is refused.
///
/// Relinking nodes that belong to a tree through [`TreeNode::set_child`]
/// bypasses the tree's bookkeeping; [`is_valid`](Self::is_valid) reports
/// whether the structure is still consistent.
///
/// # Time Complexity
///
/// | Operation       | Complexity |
/// |-----------------|------------|
/// | `new`           | O(1)       |
/// | `insert`        | O(h)       |
/// | `search`        | O(h)       |
/// | `remove`        | O(h)       |
/// | `min`/`max`     | O(h)       |
/// | `successor`     | O(h)       |
/// | `predecessor`   | O(h)       |
/// | `clear`         | O(N)       |
/// | `len`           | O(1)       |
///
/// # Examples
///
/// ```rust
/// use linked_bst::{BinarySearchTree, TreeError};
///
/// let mut tree = BinarySearchTree::new();
/// assert!(tree.insert(3).is_ok());
/// assert!(tree.insert(1).is_ok());
/// assert_eq!(tree.insert(None), Err(TreeError::MissingValue));
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.min().map(|node| *node.value()), Some(1));
/// assert!(tree.search(&2).is_none());
/// ```
pub struct BinarySearchTree<K> {
    /// Root node of the tree
    root: Option<TreeNode<K>>,
    /// Number of nodes reachable from the root
    length: usize,
}

static_assertions::assert_not_impl_any!(BinarySearchTree<i32>: Send, Sync);

impl<K> BinarySearchTree<K> {
    /// Creates a new empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::BinarySearchTree;
    ///
    /// let tree: BinarySearchTree<i32> = BinarySearchTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.to_string(), "");
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Creates a tree owning an already linked subtree.
    ///
    /// The root's parent reference is cleared, but a former parent keeps the
    /// node in its child slot until the caller clears that slot. The subtree
    /// is taken as is; use [`is_valid`](Self::is_valid) to check that it is
    /// ordered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::{BinarySearchTree, TreeNode};
    ///
    /// let root = TreeNode::new(37);
    /// root.set_left(Some(TreeNode::new(20)));
    /// root.set_right(Some(TreeNode::new(80)));
    ///
    /// let tree = BinarySearchTree::from_root(root);
    /// assert_eq!(tree.len(), 3);
    /// assert!(tree.is_valid());
    /// assert_eq!(tree.to_string(), "37( 20 , 80 )");
    /// ```
    #[must_use]
    pub fn from_root(root: TreeNode<K>) -> Self {
        root.set_parent(None);
        let length = PreOrder::new(Some(root.clone())).count();
        Self {
            root: Some(root),
            length,
        }
    }

    /// Returns the root node, or `None` if the tree is empty.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<TreeNode<K>> {
        self.root.clone()
    }

    /// Returns the number of values stored in the tree.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree holds no values.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Removes every value from the tree.
    ///
    /// Nodes that are not shared with an outstanding handle are released
    /// immediately.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::BinarySearchTree;
    ///
    /// let mut tree: BinarySearchTree<i32> = (1..=10).collect();
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert!(tree.root().is_none());
    /// ```
    pub fn clear(&mut self) {
        self.root = None;
        self.length = 0;
    }

    /// Returns the node holding the smallest value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::BinarySearchTree;
    ///
    /// let tree: BinarySearchTree<i32> = [37, 20, 80, 5].into_iter().collect();
    /// assert_eq!(tree.min().map(|node| *node.value()), Some(5));
    /// assert!(BinarySearchTree::<i32>::new().min().is_none());
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<TreeNode<K>> {
        self.root.as_ref().map(TreeNode::subtree_min)
    }

    /// Returns the node holding the largest value.
    ///
    /// With duplicates this is the most recently inserted of the largest
    /// values.
    #[must_use]
    pub fn max(&self) -> Option<TreeNode<K>> {
        self.root.as_ref().map(TreeNode::subtree_max)
    }

    /// Returns the number of nodes on the longest path from the root down to
    /// a leaf, or 0 for an empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::BinarySearchTree;
    ///
    /// let balanced: BinarySearchTree<i32> = [2, 1, 3].into_iter().collect();
    /// let chain: BinarySearchTree<i32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(balanced.height(), 2);
    /// assert_eq!(chain.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        let mut pending: SmallVec<[(TreeNode<K>, usize); STACK_CAPACITY]> =
            self.root.clone().map(|root| (root, 1)).into_iter().collect();
        let mut height = 0_usize;

        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            pending.extend(node.left().map(|left| (left, depth + 1)));
            pending.extend(node.right().map(|right| (right, depth + 1)));
        }
        height
    }

    /// Returns an iterator over the nodes in key order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> InOrder<K> {
        InOrder::new(self.root.clone())
    }

    /// Returns an iterator over the nodes in pre-order.
    #[inline]
    #[must_use]
    pub fn pre_order(&self) -> PreOrder<K> {
        PreOrder::new(self.root.clone())
    }

    /// Returns the values in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::BinarySearchTree;
    ///
    /// let tree: BinarySearchTree<&str> = ["banana", "apple", "cherry"].into_iter().collect();
    /// assert_eq!(tree.to_vec(), vec!["apple", "banana", "cherry"]);
    /// ```
    #[must_use]
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|node| node.value().clone()).collect()
    }

    fn is_root(&self, node: &TreeNode<K>) -> bool {
        self.root.as_ref().is_some_and(|root| root.ptr_eq(node))
    }

    /// Puts `substitute` where `target` is attached: at the root, or in the
    /// parent slot holding `target`. Children of either node are untouched.
    fn replace(&mut self, target: &TreeNode<K>, substitute: Option<TreeNode<K>>) {
        if self.is_root(target) {
            if let Some(substitute) = &substitute {
                substitute.set_parent(None);
            }
            self.root = substitute;
            return;
        }

        if let Some(parent) = target.parent()
            && let Some(side) = parent.side_of(target)
        {
            parent.set_child(side, substitute);
        }
    }
}

impl<K: Ord> BinarySearchTree<K> {
    /// Inserts a value into the tree.
    ///
    /// Starting from the root, the walk descends right when the value is
    /// greater than or equal to the current node's value and left otherwise,
    /// then attaches a new node at the first empty slot. Duplicates are
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingValue`] and leaves the tree unchanged when
    /// `value` is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.insert(20).unwrap();
    /// tree.insert(10).unwrap();
    /// tree.insert(20).unwrap();
    /// assert_eq!(tree.to_string(), "20( 10 , 20 )");
    /// ```
    pub fn insert(&mut self, value: impl Into<Option<K>>) -> Result<(), TreeError> {
        let value = value.into().ok_or(TreeError::MissingValue)?;
        self.attach(value);
        Ok(())
    }

    fn attach(&mut self, value: K) {
        let node = TreeNode::new(value);
        self.length += 1;

        let Some(mut current) = self.root.clone() else {
            self.root = Some(node);
            return;
        };

        loop {
            let side = if node.value() >= current.value() {
                Side::Right
            } else {
                Side::Left
            };
            let Some(next) = current.child(side) else {
                current.set_child(side, Some(node));
                return;
            };
            current = next;
        }
    }

    /// Returns the topmost node holding a value equal to `value`.
    ///
    /// Returns `None` when `value` is `None` or no node holds it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::BinarySearchTree;
    ///
    /// let tree: BinarySearchTree<i32> = [100, 90, 180].into_iter().collect();
    /// assert_eq!(tree.search(&100).unwrap().to_string(), "100( 90 , 180 )");
    /// assert!(tree.search(&1).is_none());
    /// assert!(tree.search(None).is_none());
    /// ```
    #[must_use]
    pub fn search<'v>(&self, value: impl Into<Option<&'v K>>) -> Option<TreeNode<K>>
    where
        K: 'v,
    {
        let target = value.into()?;
        let mut current = self.root.clone();

        while let Some(node) = current {
            current = match target.cmp(node.value()) {
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
                Ordering::Less => node.left(),
            };
        }
        None
    }

    /// Returns `true` if some node holds a value equal to `value`.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: &K) -> bool {
        self.search(value).is_some()
    }

    /// Removes the topmost node holding a value equal to `value`.
    ///
    /// A node with at most one child is replaced by that child. A node with
    /// two children is replaced by its in-order successor, which takes over
    /// both of its subtrees. The removed node is left fully detached.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingValue`] when `value` is `None` and
    /// [`TreeError::NotFound`] when no node holds it. The tree is unchanged
    /// in both cases.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::{BinarySearchTree, TreeError};
    ///
    /// let mut tree: BinarySearchTree<i32> = [37, 20, 80, 59, 100, 60].into_iter().collect();
    /// assert_eq!(tree.remove(None), Err(TreeError::MissingValue));
    /// assert_eq!(tree.remove(&1), Err(TreeError::NotFound));
    ///
    /// tree.remove(&37).unwrap();
    /// assert_eq!(tree.to_string(), "59( 20 , 80( 60 , 100 ) )");
    /// ```
    pub fn remove<'v>(&mut self, value: impl Into<Option<&'v K>>) -> Result<(), TreeError>
    where
        K: 'v,
    {
        let target = value.into().ok_or(TreeError::MissingValue)?;
        let node = self.search(target).ok_or(TreeError::NotFound)?;

        match (node.left(), node.right()) {
            (None, right) => self.replace(&node, right),
            (left @ Some(_), None) => self.replace(&node, left),
            (Some(left), Some(right)) => {
                let successor = right.subtree_min();
                if successor.ptr_eq(&right) {
                    self.replace(&node, Some(successor.clone()));
                    successor.set_left(Some(left));
                } else {
                    self.replace(&successor, successor.right());
                    self.replace(&node, Some(successor.clone()));
                    successor.set_left(Some(left));
                    successor.set_right(Some(right));
                }
            }
        }

        node.detach();
        self.length -= 1;
        Ok(())
    }

    /// Returns the node that follows the node holding `value` in key order.
    ///
    /// The lookup starts from the node [`search`](Self::search) finds. When
    /// it has a right subtree the answer is that subtree's minimum; otherwise
    /// it is the nearest ancestor whose value is greater than or equal to the
    /// starting value.
    ///
    /// Returns `None` when `value` is absent, not stored, or the largest.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::BinarySearchTree;
    ///
    /// let tree: BinarySearchTree<i32> = [37, 20, 80, 30, 59].into_iter().collect();
    /// assert_eq!(tree.successor(&37).map(|node| *node.value()), Some(59));
    /// assert_eq!(tree.successor(&30).map(|node| *node.value()), Some(37));
    /// assert!(tree.successor(&80).is_none());
    /// ```
    #[must_use]
    pub fn successor<'v>(&self, value: impl Into<Option<&'v K>>) -> Option<TreeNode<K>>
    where
        K: 'v,
    {
        let node = self.search(value)?;
        if let Some(right) = node.right() {
            return Some(right.subtree_min());
        }
        Self::nearest_ancestor(&node, |ancestor| ancestor >= node.value())
    }

    /// Returns the node that precedes the node holding `value` in key order.
    ///
    /// Mirrors [`successor`](Self::successor): the maximum of the left
    /// subtree if there is one, otherwise the nearest ancestor whose value is
    /// strictly less than the starting value.
    ///
    /// Returns `None` when `value` is absent, not stored, or the smallest.
    #[must_use]
    pub fn predecessor<'v>(&self, value: impl Into<Option<&'v K>>) -> Option<TreeNode<K>>
    where
        K: 'v,
    {
        let node = self.search(value)?;
        if let Some(left) = node.left() {
            return Some(left.subtree_max());
        }
        Self::nearest_ancestor(&node, |ancestor| ancestor < node.value())
    }

    fn nearest_ancestor(
        node: &TreeNode<K>,
        predicate: impl Fn(&K) -> bool,
    ) -> Option<TreeNode<K>> {
        let mut ancestor = node.parent();
        while let Some(candidate) = ancestor {
            if predicate(candidate.value()) {
                return Some(candidate);
            }
            ancestor = candidate.parent();
        }
        None
    }

    /// Checks the structural invariants of the tree.
    ///
    /// Returns `true` when every left descendant of a node is strictly less
    /// than it, every right descendant is greater than or equal to it, every
    /// child's parent reference points at the node holding it, the root has
    /// no parent, and the stored length matches the number of nodes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::{BinarySearchTree, TreeNode};
    ///
    /// let root = TreeNode::new(10);
    /// root.set_left(Some(TreeNode::new(20)));
    /// assert!(!BinarySearchTree::from_root(root).is_valid());
    /// ```
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let Some(root) = self.root.clone() else {
            return self.length == 0;
        };
        if root.parent().is_some() {
            return false;
        }

        let mut pending: SmallVec<[Bounded<K>; STACK_CAPACITY]> = SmallVec::new();
        pending.push((root, None, None));
        let mut count = 0;

        while let Some((node, lower, upper)) = pending.pop() {
            count += 1;
            let value = node.value();
            if lower.as_ref().is_some_and(|lower| value < lower.value())
                || upper.as_ref().is_some_and(|upper| value >= upper.value())
            {
                return false;
            }

            for side in [Side::Left, Side::Right] {
                let Some(child) = node.child(side) else {
                    continue;
                };
                if !child.parent().is_some_and(|parent| parent.ptr_eq(&node)) {
                    return false;
                }
                match side {
                    Side::Left => pending.push((child, lower.clone(), Some(node.clone()))),
                    Side::Right => pending.push((child, Some(node.clone()), upper.clone())),
                }
            }
        }
        count == self.length
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K> Default for BinarySearchTree<K> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Copies the tree node by node, keeping its exact shape.
impl<K: Clone> Clone for BinarySearchTree<K> {
    fn clone(&self) -> Self {
        let Some(root) = &self.root else {
            return Self::new();
        };

        let copy = TreeNode::new(root.value().clone());
        let mut pending: SmallVec<[(TreeNode<K>, TreeNode<K>); STACK_CAPACITY]> = SmallVec::new();
        pending.push((root.clone(), copy.clone()));

        while let Some((source, target)) = pending.pop() {
            for side in [Side::Left, Side::Right] {
                if let Some(child) = source.child(side) {
                    let child_copy = TreeNode::new(child.value().clone());
                    target.set_child(side, Some(child_copy.clone()));
                    pending.push((child, child_copy));
                }
            }
        }

        Self {
            root: Some(copy),
            length: self.length,
        }
    }
}

/// Two trees are equal when they have the same shape and equal values in
/// corresponding nodes.
impl<K: PartialEq> PartialEq for BinarySearchTree<K> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }

        let mut pending: SmallVec<[NodePair<K>; STACK_CAPACITY]> = SmallVec::new();
        pending.push((self.root.clone(), other.root.clone()));

        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(first), Some(second)) => {
                    if first.value() != second.value() {
                        return false;
                    }
                    pending.push((first.left(), second.left()));
                    pending.push((first.right(), second.right()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<K: Eq> Eq for BinarySearchTree<K> {}

impl<K: Ord> FromIterator<K> for BinarySearchTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for BinarySearchTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for value in iter {
            self.attach(value);
        }
    }
}

impl<K> IntoIterator for &BinarySearchTree<K> {
    type Item = TreeNode<K>;
    type IntoIter = InOrder<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug> fmt::Debug for BinarySearchTree<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<TreeNode<K>> = self.iter().collect();
        formatter
            .debug_list()
            .entries(nodes.iter().map(TreeNode::value))
            .finish()
    }
}

/// Renders the tree in the bracketed form of [`TreeNode`]'s `Display`, or
/// as an empty string when the tree is empty.
impl<K: fmt::Display> fmt::Display for BinarySearchTree<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root
            .as_ref()
            .map_or(Ok(()), |root| write!(formatter, "{root}"))
    }
}

// =============================================================================
// Serde Support
// =============================================================================

/// Serializes the values in pre-order, so that deserializing rebuilds the
/// same shape.
#[cfg(feature = "serde")]
impl<K> serde::Serialize for BinarySearchTree<K>
where
    K: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for node in self.pre_order() {
            sequence.serialize_element(node.value())?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
struct BinarySearchTreeVisitor<K> {
    marker: std::marker::PhantomData<K>,
}

#[cfg(feature = "serde")]
impl<K> BinarySearchTreeVisitor<K> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K> serde::de::Visitor<'de> for BinarySearchTreeVisitor<K>
where
    K: serde::Deserialize<'de> + Ord,
{
    type Value = BinarySearchTree<K>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut tree = BinarySearchTree::new();
        while let Some(value) = access.next_element()? {
            tree.attach(value);
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, K> serde::Deserialize<'de> for BinarySearchTree<K>
where
    K: serde::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(BinarySearchTreeVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    /// `37( 20( 10( 5 , - ) , 30 ) , 80( 59( - , 60 ) , 100( 90 , 180 ) ) )`
    #[fixture]
    fn linked() -> BinarySearchTree<i32> {
        let node = TreeNode::new;
        let (n37, n20, n80, n10, n30) = (node(37), node(20), node(80), node(10), node(30));
        let (n59, n100, n5, n60, n90, n180) =
            (node(59), node(100), node(5), node(60), node(90), node(180));

        n37.set_left(Some(n20.clone()));
        n37.set_right(Some(n80.clone()));
        n20.set_left(Some(n10.clone()));
        n20.set_right(Some(n30));
        n80.set_left(Some(n59.clone()));
        n80.set_right(Some(n100.clone()));
        n10.set_left(Some(n5));
        n59.set_right(Some(n60));
        n100.set_left(Some(n90));
        n100.set_right(Some(n180));

        BinarySearchTree::from_root(n37)
    }

    #[rstest]
    fn test_fixture_is_valid(linked: BinarySearchTree<i32>) {
        assert_eq!(linked.len(), 11);
        assert!(linked.is_valid());
        assert_eq!(linked.height(), 4);
    }

    #[rstest]
    fn test_root_replacement_clears_parent(mut linked: BinarySearchTree<i32>) {
        linked.remove(&37).unwrap();
        let root = linked.root().unwrap();
        assert_eq!(*root.value(), 59);
        assert!(root.parent().is_none());
        assert!(linked.is_valid());
    }

    #[rstest]
    fn test_removed_node_is_detached(mut linked: BinarySearchTree<i32>) {
        let removed = linked.search(&80).unwrap();
        linked.remove(&80).unwrap();

        assert!(removed.is_leaf());
        assert!(removed.parent().is_none());
        assert!(linked.is_valid());
        assert_eq!(
            linked.to_string(),
            "37( 20( 10( 5 , - ) , 30 ) , 90( 59( - , 60 ) , 100( - , 180 ) ) )"
        );
    }

    #[rstest]
    fn test_remove_only_root() {
        let mut tree: BinarySearchTree<i32> = std::iter::once(1).collect();
        tree.remove(&1).unwrap();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert!(tree.is_valid());
    }

    #[rstest]
    fn test_remove_root_with_single_child_promotes_child() {
        let mut tree: BinarySearchTree<i32> = [10, 20, 30].into_iter().collect();
        tree.remove(&10).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(*root.value(), 20);
        assert!(root.parent().is_none());
        assert!(tree.is_valid());
    }

    #[rstest]
    fn test_duplicate_search_finds_topmost() {
        let tree: BinarySearchTree<i32> = [5, 5, 5].into_iter().collect();
        let found = tree.search(&5).unwrap();
        assert!(found.ptr_eq(&tree.root().unwrap()));
        assert_eq!(tree.to_string(), "5( - , 5( - , 5 ) )");
    }

    #[rstest]
    fn test_is_valid_detects_stale_length(linked: BinarySearchTree<i32>) {
        let root = linked.root().unwrap();
        root.right().unwrap().set_right(None);
        assert!(!linked.is_valid());
    }

    #[rstest]
    fn test_is_valid_detects_equal_value_on_left() {
        let root = TreeNode::new(10);
        root.set_left(Some(TreeNode::new(10)));
        assert!(!BinarySearchTree::from_root(root).is_valid());
    }

    #[rstest]
    fn test_clone_keeps_shape_and_is_independent(linked: BinarySearchTree<i32>) {
        let mut copy = linked.clone();
        assert_eq!(copy, linked);
        assert_eq!(copy.to_string(), linked.to_string());
        assert!(copy.is_valid());

        copy.remove(&37).unwrap();
        assert_ne!(copy, linked);
        assert!(linked.contains(&37));
    }

    #[rstest]
    fn test_equality_is_structural() {
        let first: BinarySearchTree<i32> = [2, 1, 3].into_iter().collect();
        let second: BinarySearchTree<i32> = [2, 3, 1].into_iter().collect();
        let third: BinarySearchTree<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(first, second);
        assert_ne!(first, third);
    }

    #[rstest]
    fn test_debug_lists_values_in_order(linked: BinarySearchTree<i32>) {
        assert_eq!(
            format!("{linked:?}"),
            "[5, 10, 20, 30, 37, 59, 60, 80, 90, 100, 180]"
        );
    }

    #[rstest]
    fn test_deep_chain_renders_and_drops() {
        let root = TreeNode::new(0_u32);
        let mut tail = root.clone();
        for value in 1..100_000 {
            let next = TreeNode::new(value);
            tail.set_right(Some(next.clone()));
            tail = next;
        }
        drop(tail);

        let tree = BinarySearchTree::from_root(root);
        assert_eq!(tree.len(), 100_000);
        assert_eq!(tree.height(), 100_000);
        assert!(tree.is_valid());
        let rendered = tree.to_string();
        assert!(rendered.ends_with(&format!("99998( - , 99999{}", " )".repeat(99_999))));
        assert_eq!(rendered.matches(')').count(), 99_999);
        drop(tree);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_serialize_empty() {
        let tree: BinarySearchTree<i32> = BinarySearchTree::new();
        assert_eq!(serde_json::to_string(&tree).unwrap(), "[]");
    }

    #[rstest]
    fn test_serialize_uses_pre_order() {
        let tree: BinarySearchTree<i32> = [20, 10, 30, 15].into_iter().collect();
        assert_eq!(serde_json::to_string(&tree).unwrap(), "[20,10,15,30]");
    }

    #[rstest]
    fn test_deserialize_inserts_in_sequence_order() {
        let tree: BinarySearchTree<i32> = serde_json::from_str("[20,10,15,30]").unwrap();
        assert_eq!(tree.to_string(), "20( 10( - , 15 ) , 30 )");
        assert_eq!(tree.len(), 4);
    }

    #[rstest]
    fn test_roundtrip_keeps_shape() {
        let original: BinarySearchTree<i32> = [20, 10, 30, 15, 14, 5, 16, 20].into_iter().collect();
        let json = serde_json::to_string(&original).unwrap();
        let restored: BinarySearchTree<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
