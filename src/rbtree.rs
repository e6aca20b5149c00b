use std::cmp::Ordering;

use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter::{self, IntoIter, Iter};
use crate::node::{Color, Direction, Node};
use crate::noderef::NodeRef;

/// An ordered multiset of keys, backed by a red-black tree.
///
/// Equal keys are kept: inserting a key that compares equal to one already in
/// the tree places the new node in the right subtree of the existing one.
#[derive(Debug)]
pub struct RbTree<K, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<K, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of keys in the tree
    pub(crate) len: usize,
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `RbTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        RbTree {
            nodes,
            root: Self::sentinel(),
            len: 0,
        }
    }

    /// Insert a key into the tree. Duplicate keys are kept, the new node is
    /// placed to the right of the nodes it compares equal to.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_multiset::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.len(), 3);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K) {
        let node_idx = NodeIndex::new(self.nodes.len());
        let node = Self::new_node(key);
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != node_idx,
            "Reached maximum number of nodes"
        );
        self.nodes.push(node);
        self.insert_inner(node_idx);
    }

    /// Remove one occurrence of a key from the tree, returning whether the
    /// key was present. The tree is left untouched when it was not.
    ///
    /// # Example
    /// ```rust
    /// use rb_multiset::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert!(tree.remove(&3));
    /// assert!(!tree.remove(&3));
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[inline]
    pub fn remove(&mut self, key: &K) -> bool {
        if let Some(node_idx) = self.search_idx(key) {
            let detached = self.remove_inner(node_idx);
            // Swap the node with the last node stored in the vector and update indices
            let _node = self.nodes.swap_remove(detached.index());
            let old = NodeIndex::<Ix>::new(self.nodes.len());
            self.update_idx(old, detached);

            self.len = self.len.wrapping_sub(1);
            return true;
        }
        false
    }

    /// Search for a node with exactly the given key.
    ///
    /// With duplicate keys present, the match closest to the root is
    /// returned. Searching never mutates the tree.
    ///
    /// # Example
    /// ```rust
    /// use rb_multiset::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(5);
    /// assert!(tree.search(&5).is_some());
    /// assert!(tree.search(&7).is_none());
    /// ```
    #[inline]
    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K, Ix>> {
        self.search_idx(key).map(|idx| NodeRef { tree: self, idx })
    }

    /// Return `true` if the tree contains the given key.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.search_idx(key).is_some()
    }

    /// A read-only view of the root node, or `None` when the tree is empty.
    ///
    /// # Example
    /// ```rust
    /// use rb_multiset::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(1);
    /// let root = tree.root().unwrap();
    /// assert_eq!(*root.key(), 1);
    /// assert!(root.is_black());
    /// ```
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, Ix>> {
        (!self.node_ref(self.root, Node::is_sentinel)).then(|| NodeRef {
            tree: self,
            idx: self.root,
        })
    }

    /// Get an iterator over the keys of the tree, in ascending order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, Ix> {
        Iter::new(self)
    }

    /// Collect all keys in ascending order.
    ///
    /// # Example
    /// ```rust
    /// use rb_multiset::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(3);
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.in_order(), [&1, &2, &3]);
    /// ```
    #[inline]
    #[must_use]
    pub fn in_order(&self) -> Vec<&K> {
        iter::in_order_from(self, self.root)
    }

    /// Collect all keys in root-left-right order.
    ///
    /// # Example
    /// ```rust
    /// use rb_multiset::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    /// tree.insert(3);
    /// assert_eq!(tree.pre_order(), [&2, &1, &3]);
    /// ```
    #[inline]
    #[must_use]
    pub fn pre_order(&self) -> Vec<&K> {
        iter::pre_order_from(self, self.root)
    }

    /// Remove all keys from the tree
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Self::new_sentinel());
        self.root = Self::sentinel();
        self.len = 0;
    }

    /// Return the number of keys in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no keys.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> RbTree<K>
where
    K: Ord,
{
    /// Create an empty `RbTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Self::new_sentinel()],
            root: Self::sentinel(),
            len: 0,
        }
    }
}

impl<K> Default for RbTree<K>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Create a new sentinel node
    fn new_sentinel() -> Node<K, Ix> {
        Node {
            key: None,
            left: None,
            right: None,
            parent: None,
            color: Color::Black,
        }
    }

    /// Create a new tree node
    fn new_node(key: K) -> Node<K, Ix> {
        Node {
            key: Some(key),
            left: Some(Self::sentinel()),
            right: Some(Self::sentinel()),
            parent: Some(Self::sentinel()),
            color: Color::Red,
        }
    }

    /// Get the sentinel node index
    fn sentinel() -> NodeIndex<Ix> {
        NodeIndex::new(0)
    }
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Insert a node into the tree, ties descending right.
    fn insert_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y = Self::sentinel();
        let mut x = self.root;

        while !self.node_ref(x, Node::is_sentinel) {
            y = x;
            if self.node_ref(z, Node::key) < self.node_ref(x, Node::key) {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        self.node_mut(z, Node::set_parent(y));
        if self.node_ref(y, Node::is_sentinel) {
            self.root = z;
            self.node_mut(z, Node::set_color(Color::Black));
        } else {
            let dir = if self.node_ref(z, Node::key) < self.node_ref(y, Node::key) {
                Direction::Left
            } else {
                Direction::Right
            };
            self.node_mut(y, Node::set_child(dir, z));
            // A red child under the (black) root cannot violate anything.
            if !self.parent_ref(y, Node::is_sentinel) {
                self.insert_fixup(z);
            }
        }

        self.len = self.len.wrapping_add(1);
    }

    /// Remove a node from the tree, returning the index of the node that was
    /// physically detached so the arena slot can be reclaimed.
    ///
    /// A node with two children trades keys with its in-order successor and
    /// the removal recurses onto the successor, which has at most one child.
    fn remove_inner(&mut self, z: NodeIndex<Ix>) -> NodeIndex<Ix> {
        let left = self.node_ref(z, Node::left);
        let right = self.node_ref(z, Node::right);
        if !self.node_ref(left, Node::is_sentinel) && !self.node_ref(right, Node::is_sentinel) {
            let successor = self.tree_minimum(right);
            self.swap_keys(z, successor);
            return self.remove_inner(successor);
        }

        let replacement = if self.node_ref(left, Node::is_sentinel) {
            right
        } else {
            left
        };
        let both_black =
            self.node_ref(z, Node::is_black) && self.node_ref(replacement, Node::is_black);
        let parent = self.node_ref(z, Node::parent);

        if self.node_ref(replacement, Node::is_sentinel) {
            // leaf
            if z == self.root {
                self.root = Self::sentinel();
            } else {
                if both_black {
                    // The fixup needs z still attached to find its sibling.
                    self.fix_double_black(z);
                } else {
                    let sibling = self.sibling_of(z);
                    if !self.node_ref(sibling, Node::is_sentinel) {
                        self.node_mut(sibling, Node::set_color(Color::Red));
                    }
                }
                let dir = self.direction_of(z);
                self.node_mut(parent, Node::set_child(dir, Self::sentinel()));
            }
            return z;
        }

        // one child
        if z == self.root {
            self.root = replacement;
            self.node_mut(replacement, Node::set_parent(Self::sentinel()));
            self.node_mut(replacement, Node::set_color(Color::Black));
        } else {
            let dir = self.direction_of(z);
            self.node_mut(parent, Node::set_child(dir, replacement));
            self.node_mut(replacement, Node::set_parent(parent));
            if both_black {
                self.fix_double_black(replacement);
            } else {
                self.node_mut(replacement, Node::set_color(Color::Black));
            }
        }
        z
    }

    /// Search for the node with exactly the given key.
    fn search_idx(&self, key: &K) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            match key.cmp(self.node_ref(x, Node::key)) {
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
                Ordering::Equal => return Some(x),
            }
        }
        None
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.grand_parent_ref(z, Node::is_sentinel) {
                break;
            }
            let dir = self.direction_of(self.node_ref(z, Node::parent));
            let uncle = self.grand_parent_ref(z, Node::child(dir.opposite()));
            if self.node_ref(uncle, Node::is_red) {
                self.parent_mut(z, Node::set_color(Color::Black));
                self.node_mut(uncle, Node::set_color(Color::Black));
                self.grand_parent_mut(z, Node::set_color(Color::Red));
                z = self.parent_ref(z, Node::parent);
            } else {
                if self.direction_of(z) != dir {
                    z = self.node_ref(z, Node::parent);
                    self.rotate(z, dir);
                }
                self.parent_mut(z, Node::set_color(Color::Black));
                self.grand_parent_mut(z, Node::set_color(Color::Red));
                self.rotate(self.parent_ref(z, Node::parent), dir.opposite());
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Resolve the double-black deficiency at `x` after a removal.
    ///
    /// `x` is still attached to its parent; its subtree is one black level
    /// short. Terminates at the root, otherwise rotates/recolors around the
    /// sibling, propagating upward when the sibling cannot absorb the
    /// missing black.
    fn fix_double_black(&mut self, x: NodeIndex<Ix>) {
        if x == self.root {
            return;
        }
        let parent = self.node_ref(x, Node::parent);
        let sibling = self.sibling_of(x);
        if self.node_ref(sibling, Node::is_sentinel) {
            self.fix_double_black(parent);
            return;
        }
        let dir = self.direction_of(sibling);
        if self.node_ref(sibling, Node::is_red) {
            // Case reduction: pull the red sibling above the parent and retry
            // with the new, black sibling.
            self.node_mut(parent, Node::set_color(Color::Red));
            self.node_mut(sibling, Node::set_color(Color::Black));
            self.rotate(parent, dir.opposite());
            self.fix_double_black(x);
        } else if self.has_red_child(sibling) {
            // Terminal: one or two rotations, the outer child preferred when
            // both are red, and the parent ends black.
            let outer = self.node_ref(sibling, Node::child(dir));
            if self.node_ref(outer, Node::is_red) {
                self.node_mut(outer, Node::set_color(self.node_ref(sibling, Node::color)));
                self.node_mut(sibling, Node::set_color(self.node_ref(parent, Node::color)));
            } else {
                let inner = self.node_ref(sibling, Node::child(dir.opposite()));
                self.node_mut(inner, Node::set_color(self.node_ref(parent, Node::color)));
                self.rotate(sibling, dir);
            }
            self.rotate(parent, dir.opposite());
            self.node_mut(parent, Node::set_color(Color::Black));
        } else {
            // Both sibling children black: drop a black level at the sibling
            // and let the parent absorb it, or push the deficiency up.
            self.node_mut(sibling, Node::set_color(Color::Red));
            if self.node_ref(parent, Node::is_black) {
                self.fix_double_black(parent);
            } else {
                self.node_mut(parent, Node::set_color(Color::Black));
            }
        }
    }

    /// Binary tree rotation; `rotate(x, Left)` promotes the right child.
    ///
    /// Repairs all affected parent links. Never changes colors.
    fn rotate(&mut self, x: NodeIndex<Ix>, dir: Direction) {
        let od = dir.opposite();
        if self.child_ref(x, od, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::child(od));
        self.node_mut(x, Node::set_child(od, self.node_ref(y, Node::child(dir))));
        if !self.child_ref(y, dir, Node::is_sentinel) {
            self.child_mut(y, dir, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_child(dir, x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else {
            let dir = self.direction_of(x);
            self.parent_mut(x, Node::set_child(dir, y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// The side of `node` under its parent.
    fn direction_of(&self, node: NodeIndex<Ix>) -> Direction {
        if self.parent_ref(node, Node::left) == node {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// The other child of `node`'s parent; the sentinel when `node` is the
    /// root or the slot is empty.
    pub(crate) fn sibling_of(&self, node: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if self.parent_ref(node, Node::is_sentinel) {
            return Self::sentinel();
        }
        let dir = self.direction_of(node);
        self.parent_ref(node, Node::child(dir.opposite()))
    }

    /// Whether either existing child of `node` is red.
    pub(crate) fn has_red_child(&self, node: NodeIndex<Ix>) -> bool {
        self.left_ref(node, Node::is_red) || self.right_ref(node, Node::is_red)
    }

    /// Find the node with the minimum key in the subtree of `x`.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Trade the keys of two nodes, leaving links and colors in place.
    fn swap_keys(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) {
        let tmp = self.nodes[a.index()].key.take();
        let other = std::mem::replace(&mut self.nodes[b.index()].key, tmp);
        self.nodes[a.index()].key = other;
    }

    /// Update node indices after `swap_remove` moved the last node of the
    /// arena into the reclaimed slot.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if self.root == old {
            self.root = new;
        }
        if self.nodes.get(new.index()).is_some() {
            if !self.parent_ref(new, Node::is_sentinel) {
                if self.parent_ref(new, Node::left) == old {
                    self.parent_mut(new, Node::set_child(Direction::Left, new));
                } else {
                    self.parent_mut(new, Node::set_child(Direction::Right, new));
                }
            }
            if !self.left_ref(new, Node::is_sentinel) {
                self.left_mut(new, Node::set_parent(new));
            }
            if !self.right_ref(new, Node::is_sentinel) {
                self.right_mut(new, Node::set_parent(new));
            }
        }
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, Ix> RbTree<K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn child_ref<F, R>(&'a self, node: NodeIndex<Ix>, dir: Direction, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = match dir {
            Direction::Left => self.nodes[node.index()].left().index(),
            Direction::Right => self.nodes[node.index()].right().index(),
        };
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn child_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, dir: Direction, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = match dir {
            Direction::Left => self.nodes[node.index()].left().index(),
            Direction::Right => self.nodes[node.index()].right().index(),
        };
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}

impl<'a, K, Ix> IntoIterator for &'a RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

impl<K, Ix> IntoIterator for RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = K;
    type IntoIter = IntoIter<K, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
