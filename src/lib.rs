//! This crate exposes a link-based Binary Search Tree (BST) that is kept as simple as possible:
//! it never balances itself, but it can measure how balanced it is and rebuild itself on demand.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored items. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores one item and
//! will sometimes have child `Node`s. The most important invariants of this BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have an
//!    item less than its own item.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have an
//!    item greater than or equal to its own item. Duplicates go right.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for items in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). Adding items in sorted order makes every `Node`
//! the right child of the one before, so the height grows to `N - 1`. [`linked::Tree::rebalance`]
//! rebuilds such a tree with a height of `O(lg N)` where `N` is the number of items.
//! BSTs also naturally support sorted iteration by visiting the
//! left subtree, then the subtree root, then the right subtree.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
pub mod iter;
pub mod linked;

pub use error::TreeError;
