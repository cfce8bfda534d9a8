//! Traversals over a [`Tree`](crate::linked::Tree). All of them keep their own stack of nodes so
//! walking a long chain never recurses.

use crate::linked::{release, Link, Node};

/// Borrowing iterator that yields each item before the items of its subtrees, left subtree
/// first. Created by [`Tree::preorder`](crate::linked::Tree::preorder) or by iterating over
/// `&Tree`.
pub struct Preorder<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Preorder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for Preorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree is popped next.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(&node.item)
    }
}

/// Borrowing iterator over the items in sorted order. Created by
/// [`Tree::inorder`](crate::linked::Tree::inorder).
pub struct Inorder<'a, T> {
    /// Nodes whose left subtree is being walked, deepest on top.
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Inorder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Inorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.item)
    }
}

/// Owning iterator over the items in sorted order. Created by calling `into_iter` on a
/// [`Tree`](crate::linked::Tree).
pub struct IntoIter<T> {
    /// Nodes already cut off from their left child, deepest on top.
    stack: Vec<Box<Node<T>>>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        Some(node.item)
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for node in self.stack.drain(..) {
            release(Some(node));
        }
    }
}
