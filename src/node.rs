use crate::index::{IndexType, NodeIndex};

/// Node of the red-black tree.
///
/// A node's link fields always hold `Some` index, pointing at the sentinel
/// when the logical link is absent; only the sentinel itself keeps `None`.
#[derive(Debug)]
pub struct Node<K, Ix> {
    /// Left child
    pub left: Option<NodeIndex<Ix>>,
    /// Right child
    pub right: Option<NodeIndex<Ix>>,
    /// Parent
    pub parent: Option<NodeIndex<Ix>>,
    /// Color of the node
    pub color: Color,
    /// Key of the node, `None` for the sentinel
    pub key: Option<K>,
}

// Convenient getter/setter methods
impl<K, Ix> Node<K, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn key(&self) -> &K {
        self.key.as_ref().unwrap()
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left.unwrap()
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right.unwrap()
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent.unwrap()
    }

    pub fn child(dir: Direction) -> impl FnOnce(&Self) -> NodeIndex<Ix> {
        move |node: &Self| match dir {
            Direction::Left => node.left.unwrap(),
            Direction::Right => node.right.unwrap(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.key.is_none()
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            node.color = color;
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            let _ignore = node.parent.replace(parent);
        }
    }

    pub fn set_child(dir: Direction, child: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            let _ignore = match dir {
                Direction::Left => node.left.replace(child),
                Direction::Right => node.right.replace(child),
            };
        }
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}

/// The side a node occupies under its parent.
///
/// Every mirrored rebalancing branch is parametrized over this, so the
/// left/right pairs share one implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
