//! `rb-multiset` is an ordered multiset based on a red-black tree.
//!
//! It fully implements the insertion and deletion rebalancing of a red-black tree,
//! ensuring that each modification operation requires at most O(logN) time complexity.
//! Duplicate keys are kept: a key equal to one already present is placed to the
//! right of it, and in-order traversal yields the full multiset in sorted order.
//!
//! To safely and efficiently handle the mutable parent back-references of a
//! red-black tree in Rust, `rb-multiset` uses an array to simulate pointers for
//! managing the parent-child links. This approach also ensures that the tree has
//! the `Send` and `Unpin` traits, allowing it to be safely transferred between
//! threads and to maintain a fixed memory location during asynchronous operations.
//! The tree is not safe for concurrent mutation; callers needing shared access
//! must serialize externally.
//!
//! # Example
//!
//! ```rust
//! use rb_multiset::RbTree;
//!
//! let mut tree = RbTree::new();
//! tree.insert(3);
//! tree.insert(1);
//! tree.insert(2);
//! assert_eq!(tree.in_order(), [&1, &2, &3]);
//! assert!(tree.remove(&2));
//! assert!(!tree.contains(&2));
//! ```
//!

mod index;
mod iter;
mod node;
mod noderef;
mod rbtree;


pub use iter::{IntoIter, Iter};
pub use node::Color;
pub use noderef::NodeRef;
pub use rbtree::RbTree;
