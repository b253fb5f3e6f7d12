//! Triple-linked tree nodes.
//!
//! A [`TreeNode`] is a cheap, cloneable handle to one node of a binary tree.
//! Each node owns its left and right children and keeps a non-owning
//! back-reference to its parent, so the ownership graph always stays a tree
//! and a detached subtree is released as soon as its last handle goes away.
//!
//! The node layer only keeps the parent and child links consistent. Key
//! ordering is the business of [`BinarySearchTree`](crate::BinarySearchTree).
//!
//! # Examples
//!
//! ```rust
//! use linked_bst::TreeNode;
//!
//! let root = TreeNode::new(20);
//! root.set_left(Some(TreeNode::new(10)));
//! root.set_right(Some(TreeNode::new(30)));
//!
//! let left = root.left().unwrap();
//! assert!(left.parent().unwrap().ptr_eq(&root));
//! assert_eq!(root.to_string(), "20( 10 , 30 )");
//! ```

use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Inline capacity of the explicit stacks used to walk a subtree.
pub const STACK_CAPACITY: usize = 16;

// =============================================================================
// Side Definition
// =============================================================================

/// One of the two child slots of a node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    /// The left child slot, holding strictly smaller keys.
    Left,
    /// The right child slot, holding greater or equal keys.
    Right,
}

impl Side {
    /// Returns the other slot.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

// =============================================================================
// Node Definition
// =============================================================================

/// Shared storage behind every [`TreeNode`] handle.
struct NodeInner<K> {
    value: K,
    links: RefCell<Links<K>>,
}

struct Links<K> {
    parent: Weak<NodeInner<K>>,
    left: Option<TreeNode<K>>,
    right: Option<TreeNode<K>>,
}

impl<K> Links<K> {
    const fn child(&self, side: Side) -> Option<&TreeNode<K>> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    const fn slot_mut(&mut self, side: Side) -> &mut Option<TreeNode<K>> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

impl<K> Drop for NodeInner<K> {
    // Unlinks uniquely owned descendants one at a time so that dropping a
    // degenerate tree does not recurse once per level.
    fn drop(&mut self) {
        let links = self.links.get_mut();
        let mut pending: SmallVec<[TreeNode<K>; STACK_CAPACITY]> = SmallVec::new();
        pending.extend(links.left.take());
        pending.extend(links.right.take());

        while let Some(node) = pending.pop() {
            if let Ok(mut inner) = Rc::try_unwrap(node.inner) {
                let links = inner.links.get_mut();
                pending.extend(links.left.take());
                pending.extend(links.right.take());
            }
        }
    }
}

/// A handle to a node with a value, two owned children and a parent
/// back-reference.
///
/// Cloning a `TreeNode` clones the handle, not the node: both handles refer
/// to the same node, as [`TreeNode::ptr_eq`] reports.
///
/// # Invariants
///
/// Whenever a node is installed as the left or right child of another node
/// through [`TreeNode::set_child`], its parent becomes that node.
pub struct TreeNode<K> {
    inner: Rc<NodeInner<K>>,
}

impl<K> Clone for TreeNode<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

static_assertions::assert_not_impl_any!(TreeNode<i32>: Send, Sync);
static_assertions::assert_not_impl_any!(TreeNode<String>: Send, Sync);

impl<K> TreeNode<K> {
    /// Creates a detached node holding `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::TreeNode;
    ///
    /// let node = TreeNode::new(42);
    /// assert_eq!(*node.value(), 42);
    /// assert!(node.is_leaf());
    /// assert!(node.parent().is_none());
    /// ```
    #[must_use]
    pub fn new(value: K) -> Self {
        Self {
            inner: Rc::new(NodeInner {
                value,
                links: RefCell::new(Links {
                    parent: Weak::new(),
                    left: None,
                    right: None,
                }),
            }),
        }
    }

    /// Returns the value stored in this node.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &K {
        &self.inner.value
    }

    /// Returns the left child, if any.
    #[inline]
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.child(Side::Left)
    }

    /// Returns the right child, if any.
    #[inline]
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.child(Side::Right)
    }

    /// Returns the child in the given slot, if any.
    #[must_use]
    pub fn child(&self, side: Side) -> Option<Self> {
        self.inner.links.borrow().child(side).cloned()
    }

    /// Returns the node currently holding this node as a child.
    ///
    /// Returns `None` for a root or detached node, and for a node whose
    /// former parent has already been released.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.inner
            .links
            .borrow()
            .parent
            .upgrade()
            .map(|inner| Self { inner })
    }

    /// Replaces the left child. See [`TreeNode::set_child`].
    #[inline]
    pub fn set_left(&self, node: Option<Self>) {
        self.set_child(Side::Left, node);
    }

    /// Replaces the right child. See [`TreeNode::set_child`].
    #[inline]
    pub fn set_right(&self, node: Option<Self>) {
        self.set_child(Side::Right, node);
    }

    /// Installs `node` in the given child slot.
    ///
    /// Installing the node already held in the slot is a no-op. Otherwise the
    /// slot is overwritten and, when `node` is present, its parent becomes
    /// this node. The previous child keeps its parent reference; callers that
    /// discard it are responsible for not reusing it.
    ///
    /// No ordering check is made here.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linked_bst::{Side, TreeNode};
    ///
    /// let root = TreeNode::new(5);
    /// let child = TreeNode::new(9);
    /// root.set_child(Side::Right, Some(child.clone()));
    /// root.set_child(Side::Right, Some(child.clone()));
    ///
    /// assert!(root.right().unwrap().ptr_eq(&child));
    /// assert!(child.parent().unwrap().ptr_eq(&root));
    /// ```
    pub fn set_child(&self, side: Side, node: Option<Self>) {
        let _previous = {
            let mut links = self.inner.links.borrow_mut();
            let slot = links.slot_mut(side);
            if Self::same_node(slot.as_ref(), node.as_ref()) {
                return;
            }
            std::mem::replace(slot, node.clone())
        };

        if let Some(child) = node {
            child.inner.links.borrow_mut().parent = Rc::downgrade(&self.inner);
        }
    }

    /// Returns `true` if both handles refer to the same node.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Returns `true` if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        let links = self.inner.links.borrow();
        links.left.is_none() && links.right.is_none()
    }

    /// Returns the slot of this node that holds `child`, checking the left
    /// slot first.
    #[must_use]
    pub fn side_of(&self, child: &Self) -> Option<Side> {
        let links = self.inner.links.borrow();
        [Side::Left, Side::Right]
            .into_iter()
            .find(|&side| links.child(side).is_some_and(|held| held.ptr_eq(child)))
    }

    /// Returns the leftmost node of the subtree rooted here.
    #[must_use]
    pub fn subtree_min(&self) -> Self {
        self.descend(Side::Left)
    }

    /// Returns the rightmost node of the subtree rooted here.
    #[must_use]
    pub fn subtree_max(&self) -> Self {
        self.descend(Side::Right)
    }

    fn descend(&self, side: Side) -> Self {
        let mut current = self.clone();
        while let Some(next) = current.child(side) {
            current = next;
        }
        current
    }

    /// Overwrites the parent reference without touching any child slot.
    pub(crate) fn set_parent(&self, parent: Option<&Self>) {
        self.inner.links.borrow_mut().parent =
            parent.map_or_else(Weak::new, |parent| Rc::downgrade(&parent.inner));
    }

    /// Clears every link of this node, leaving a detached single node.
    ///
    /// The former children keep whatever parent they currently have.
    pub(crate) fn detach(&self) {
        let (_left, _right) = {
            let mut links = self.inner.links.borrow_mut();
            links.parent = Weak::new();
            (links.left.take(), links.right.take())
        };
    }

    fn same_node(first: Option<&Self>, second: Option<&Self>) -> bool {
        match (first, second) {
            (None, None) => true,
            (Some(first), Some(second)) => first.ptr_eq(second),
            _ => false,
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

enum Token<K> {
    Node(TreeNode<K>),
    Text(&'static str),
}

/// Renders the subtree in bracketed pre-order: `value( left , right )`, with
/// `-` for an absent child and no brackets at all for a leaf.
///
/// # Examples
///
/// ```rust
/// use linked_bst::TreeNode;
///
/// let root = TreeNode::new(59);
/// root.set_right(Some(TreeNode::new(60)));
/// assert_eq!(root.to_string(), "59( - , 60 )");
/// assert_eq!(root.right().unwrap().to_string(), "60");
/// ```
impl<K: fmt::Display> fmt::Display for TreeNode<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending: SmallVec<[Token<K>; STACK_CAPACITY]> = SmallVec::new();
        pending.push(Token::Node(self.clone()));

        while let Some(token) = pending.pop() {
            match token {
                Token::Text(text) => formatter.write_str(text)?,
                Token::Node(node) => {
                    write!(formatter, "{}", node.value())?;
                    let (left, right) = (node.left(), node.right());
                    if left.is_none() && right.is_none() {
                        continue;
                    }
                    pending.push(Token::Text(" )"));
                    pending.push(right.map_or(Token::Text("-"), Token::Node));
                    pending.push(Token::Text(" , "));
                    pending.push(left.map_or(Token::Text("-"), Token::Node));
                    pending.push(Token::Text("( "));
                }
            }
        }
        Ok(())
    }
}

impl<K: fmt::Debug> fmt::Debug for TreeNode<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (left, right, parent) = (self.left(), self.right(), self.parent());
        formatter
            .debug_struct("TreeNode")
            .field("value", self.value())
            .field("left", &left.as_ref().map(Self::value))
            .field("right", &right.as_ref().map(Self::value))
            .field("parent", &parent.as_ref().map(Self::value))
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
