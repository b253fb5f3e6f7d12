//! Iterators over the nodes of a tree.
//!
//! Both iterators walk an explicit stack and yield [`TreeNode`] handles, so
//! a traversal never recurses and never borrows the tree's links for longer
//! than one step.

use std::iter::FusedIterator;

use smallvec::SmallVec;

use crate::node::{STACK_CAPACITY, TreeNode};

// =============================================================================
// In-Order Iterator
// =============================================================================

/// An iterator over the nodes of a subtree in key order.
///
/// Nodes holding equal values come out in insertion order, since equal
/// values are always stored to the right.
///
/// # Examples
///
/// ```rust
/// use linked_bst::BinarySearchTree;
///
/// let tree: BinarySearchTree<i32> = [50, 30, 70, 30].into_iter().collect();
/// let values: Vec<i32> = tree.iter().map(|node| *node.value()).collect();
/// assert_eq!(values, vec![30, 30, 50, 70]);
/// ```
pub struct InOrder<K> {
    stack: SmallVec<[TreeNode<K>; STACK_CAPACITY]>,
    current: Option<TreeNode<K>>,
}

impl<K> InOrder<K> {
    pub(crate) fn new(root: Option<TreeNode<K>>) -> Self {
        Self {
            stack: SmallVec::new(),
            current: root,
        }
    }
}

impl<K> Iterator for InOrder<K> {
    type Item = TreeNode<K>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current.take() {
            self.current = node.left();
            self.stack.push(node);
        }
        let node = self.stack.pop()?;
        self.current = node.right();
        Some(node)
    }
}

impl<K> FusedIterator for InOrder<K> {}

// =============================================================================
// Pre-Order Iterator
// =============================================================================

/// An iterator over the nodes of a subtree in pre-order: a node first, then
/// its left subtree, then its right subtree.
///
/// Inserting the values of a valid tree in this order into an empty tree
/// rebuilds the same shape.
///
/// # Examples
///
/// ```rust
/// use linked_bst::BinarySearchTree;
///
/// let tree: BinarySearchTree<i32> = [50, 30, 70, 20, 40].into_iter().collect();
/// let values: Vec<i32> = tree.pre_order().map(|node| *node.value()).collect();
/// assert_eq!(values, vec![50, 30, 20, 40, 70]);
/// ```
pub struct PreOrder<K> {
    stack: SmallVec<[TreeNode<K>; STACK_CAPACITY]>,
}

impl<K> PreOrder<K> {
    pub(crate) fn new(root: Option<TreeNode<K>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<K> Iterator for PreOrder<K> {
    type Item = TreeNode<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}

impl<K> FusedIterator for PreOrder<K> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    /// `50( 30( 20 , 40 ) , 70( - , 80 ) )`
    #[fixture]
    fn root() -> TreeNode<i32> {
        let root = TreeNode::new(50);
        let left = TreeNode::new(30);
        let right = TreeNode::new(70);
        left.set_left(Some(TreeNode::new(20)));
        left.set_right(Some(TreeNode::new(40)));
        right.set_right(Some(TreeNode::new(80)));
        root.set_left(Some(left));
        root.set_right(Some(right));
        root
    }

    fn values(nodes: impl Iterator<Item = TreeNode<i32>>) -> Vec<i32> {
        nodes.map(|node| *node.value()).collect()
    }

    #[rstest]
    fn test_in_order(root: TreeNode<i32>) {
        assert_eq!(values(InOrder::new(Some(root))), vec![20, 30, 40, 50, 70, 80]);
    }

    #[rstest]
    fn test_pre_order(root: TreeNode<i32>) {
        assert_eq!(values(PreOrder::new(Some(root))), vec![50, 30, 20, 40, 70, 80]);
    }

    #[rstest]
    fn test_empty_traversals() {
        assert_eq!(InOrder::<i32>::new(None).next().map(|node| *node.value()), None);
        assert_eq!(PreOrder::<i32>::new(None).next().map(|node| *node.value()), None);
    }

    #[rstest]
    fn test_in_order_is_fused(root: TreeNode<i32>) {
        let mut iterator = InOrder::new(Some(root));
        assert_eq!(iterator.by_ref().count(), 6);
        assert!(iterator.next().is_none());
        assert!(iterator.next().is_none());
    }

    #[rstest]
    fn test_subtree_traversal(root: TreeNode<i32>) {
        let right = root.right().unwrap();
        assert_eq!(values(InOrder::new(Some(right))), vec![70, 80]);
    }
}
