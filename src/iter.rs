use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::rbtree::RbTree;

/// Pushes a link of nodes on the left to stack.
fn left_link<K, Ix>(tree_ref: &RbTree<K, Ix>, mut x: NodeIndex<Ix>) -> Vec<NodeIndex<Ix>>
where
    K: Ord,
    Ix: IndexType,
{
    let mut nodes = vec![];
    while !tree_ref.node_ref(x, Node::is_sentinel) {
        nodes.push(x);
        x = tree_ref.node_ref(x, Node::left);
    }
    nodes
}

/// Collect the keys of the subtree rooted at `start` in ascending order.
///
/// Iterative: the stack stands in for the call stack, keys are recorded
/// after the pop.
pub(crate) fn in_order_from<'a, K, Ix>(
    tree_ref: &'a RbTree<K, Ix>,
    start: NodeIndex<Ix>,
) -> Vec<&'a K>
where
    K: Ord,
    Ix: IndexType,
{
    let mut stack = Vec::new();
    let mut keys = Vec::new();
    let mut x = start;
    loop {
        while !tree_ref.node_ref(x, Node::is_sentinel) {
            stack.push(x);
            x = tree_ref.node_ref(x, Node::left);
        }
        let Some(top) = stack.pop() else {
            break;
        };
        keys.push(tree_ref.node_ref(top, Node::key));
        x = tree_ref.node_ref(top, Node::right);
    }
    keys
}

/// Collect the keys of the subtree rooted at `start` in root-left-right
/// order. Same walk as [`in_order_from`], keys recorded on the way down.
pub(crate) fn pre_order_from<'a, K, Ix>(
    tree_ref: &'a RbTree<K, Ix>,
    start: NodeIndex<Ix>,
) -> Vec<&'a K>
where
    K: Ord,
    Ix: IndexType,
{
    let mut stack = Vec::new();
    let mut keys = Vec::new();
    let mut x = start;
    loop {
        while !tree_ref.node_ref(x, Node::is_sentinel) {
            keys.push(tree_ref.node_ref(x, Node::key));
            stack.push(x);
            x = tree_ref.node_ref(x, Node::left);
        }
        let Some(top) = stack.pop() else {
            break;
        };
        x = tree_ref.node_ref(top, Node::right);
    }
    keys
}

/// An iterator over the keys of a `RbTree`, in ascending order.
#[derive(Debug)]
pub struct Iter<'a, K, Ix>
where
    K: Ord,
{
    /// Reference to the tree
    tree_ref: &'a RbTree<K, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<'a, K, Ix> Iter<'a, K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(tree_ref: &'a RbTree<K, Ix>) -> Self {
        Iter {
            tree_ref,
            stack: left_link(tree_ref, tree_ref.root),
        }
    }
}

impl<'a, K, Ix> Iterator for Iter<'a, K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        self.stack.extend(left_link(
            self.tree_ref,
            self.tree_ref.node_ref(x, Node::right),
        ));
        Some(self.tree_ref.node_ref(x, Node::key))
    }
}

/// An owning iterator over the keys of a `RbTree`, in ascending order.
#[derive(Debug)]
pub struct IntoIter<K, Ix>
where
    K: Ord,
{
    tree: RbTree<K, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<K, Ix> IntoIter<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    pub(crate) fn new(tree: RbTree<K, Ix>) -> Self {
        let mut temp = IntoIter {
            tree,
            stack: vec![],
        };
        temp.stack = left_link(&temp.tree, temp.tree.root);
        temp
    }
}

impl<K, Ix> Iterator for IntoIter<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        self.stack
            .extend(left_link(&self.tree, self.tree.node_ref(x, Node::right)));
        self.tree.nodes[x.index()].key.take()
    }
}
