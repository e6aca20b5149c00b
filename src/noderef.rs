use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter;
use crate::node::{Color, Node};
use crate::rbtree::RbTree;

/// A read-only view of a single node in a [`RbTree`].
///
/// Pure queries over the current link state; holding a `NodeRef` borrows the
/// tree, so the tree cannot be mutated while views into it are alive.
#[derive(Debug)]
pub struct NodeRef<'a, K, Ix = DefaultIx>
where
    K: Ord,
{
    /// Reference to the tree
    pub(crate) tree: &'a RbTree<K, Ix>,
    /// The viewed node
    pub(crate) idx: NodeIndex<Ix>,
}

impl<'a, K, Ix> NodeRef<'a, K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// The key held by this node.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.tree.node_ref(self.idx, Node::key)
    }

    /// The color of this node.
    #[inline]
    #[must_use]
    pub fn color(&self) -> Color {
        self.tree.node_ref(self.idx, Node::color)
    }

    #[inline]
    #[must_use]
    pub fn is_red(&self) -> bool {
        self.tree.node_ref(self.idx, Node::is_red)
    }

    #[inline]
    #[must_use]
    pub fn is_black(&self) -> bool {
        self.tree.node_ref(self.idx, Node::is_black)
    }

    /// The left child, or `None` if there is none.
    #[inline]
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.wrap(self.tree.node_ref(self.idx, Node::left))
    }

    /// The right child, or `None` if there is none.
    #[inline]
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.wrap(self.tree.node_ref(self.idx, Node::right))
    }

    /// The parent, or `None` if this node is the root.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.wrap(self.tree.node_ref(self.idx, Node::parent))
    }

    /// The other child of this node's parent, or `None` if this node is the
    /// root or the parent has no other child.
    ///
    /// # Example
    /// ```rust
    /// use rb_multiset::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(3);
    /// let one = tree.search(&1).unwrap();
    /// assert_eq!(*one.sibling().unwrap().key(), 3);
    /// assert!(tree.root().unwrap().sibling().is_none());
    /// ```
    #[inline]
    #[must_use]
    pub fn sibling(&self) -> Option<Self> {
        self.wrap(self.tree.sibling_of(self.idx))
    }

    /// Whether either existing child of this node is red.
    #[inline]
    #[must_use]
    pub fn has_red_child(&self) -> bool {
        self.tree.has_red_child(self.idx)
    }

    /// Collect the keys of the subtree rooted at this node, in ascending
    /// order.
    #[inline]
    #[must_use]
    pub fn in_order(&self) -> Vec<&'a K> {
        iter::in_order_from(self.tree, self.idx)
    }

    /// Collect the keys of the subtree rooted at this node, in
    /// root-left-right order.
    ///
    /// # Example
    /// ```rust
    /// use rb_multiset::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for key in 1..=3 {
    ///     tree.insert(key);
    /// }
    /// assert_eq!(tree.root().unwrap().pre_order(), [&2, &1, &3]);
    /// ```
    #[inline]
    #[must_use]
    pub fn pre_order(&self) -> Vec<&'a K> {
        iter::pre_order_from(self.tree, self.idx)
    }

    fn wrap(&self, idx: NodeIndex<Ix>) -> Option<Self> {
        (!self.tree.node_ref(idx, Node::is_sentinel)).then(|| NodeRef {
            tree: self.tree,
            idx,
        })
    }
}

impl<K: Ord, Ix: Copy> Clone for NodeRef<'_, K, Ix> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Ord, Ix: Copy> Copy for NodeRef<'_, K, Ix> {}
