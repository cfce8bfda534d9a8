//! A link-based BST. Every node exclusively owns its children and nothing points back up the
//! tree. The tree does not balance itself: its shape is whatever the insertion order made it
//! until [`Tree::rebalance`] is called.
//!
//! # Examples
//!
//! ```
//! use linked_bst::linked::Tree;
//! use linked_bst::TreeError;
//!
//! let mut tree: Tree<i32> = [5, 1, 9, 3, 7].into_iter().collect();
//!
//! assert_eq!(tree.len(), 5);
//! assert_eq!(tree.find(&3), Some(&3));
//! assert_eq!(tree.range_find(&3, &7), vec![&3, &5, &7]);
//!
//! // Removing an item hands it back.
//! assert_eq!(tree.remove(&3), Ok(3));
//! assert_eq!(tree.remove(&3), Err(TreeError::NotFound));
//!
//! // Neighbors don't need the item to be in the tree.
//! assert_eq!(tree.successor(&3), Some(&5));
//! assert_eq!(tree.predecessor(&3), Some(&1));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::iter::{Inorder, IntoIter, Preorder};
use crate::TreeError;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// An unbalanced Binary Search Tree of comparable items. Items that compare less than a node go
/// into its left subtree and everything else, including duplicates, goes into its right subtree.
pub struct Tree<T> {
    root: Link<T>,
    /// How many items have been added and not yet removed.
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        // Copies in preorder, each with the index of its parent and whether it is the left child.
        // Parents always come before their children.
        let mut copies: Vec<(Box<Node<T>>, Option<(usize, bool)>)> = Vec::new();
        let mut stack: Vec<(&Node<T>, Option<(usize, bool)>)> =
            self.root.as_deref().map(|root| (root, None)).into_iter().collect();
        while let Some((node, parent)) = stack.pop() {
            let index = copies.len();
            copies.push((Node::new_boxed(node.item.clone()), parent));
            if let Some(right) = node.right.as_deref() {
                stack.push((right, Some((index, false))));
            }
            if let Some(left) = node.left.as_deref() {
                stack.push((left, Some((index, true))));
            }
        }

        // Linking from the back hands every copy to its parent after its own children are in.
        let mut root = None;
        while let Some((copy, parent)) = copies.pop() {
            match parent {
                Some((index, true)) => copies[index].0.left = Some(copy),
                Some((index, false)) => copies[index].0.right = Some(copy),
                None => root = Some(copy),
            }
        }
        Self {
            root,
            len: self.len,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("items", &self.inorder().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of items stored in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every item from the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let mut tree: Tree<_> = (0..10).collect();
    /// tree.clear();
    ///
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.find(&3), None);
    /// ```
    pub fn clear(&mut self) {
        log::debug!("clearing tree of {} items", self.len);
        release(self.root.take());
        self.len = 0;
    }

    /// Potentially finds the stored item equal to `item`. If no node holds such an item, `None`
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add("pear");
    ///
    /// assert_eq!(tree.find(&"pear"), Some(&"pear"));
    /// assert_eq!(tree.find(&"plum"), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        self.root.as_deref().and_then(|n| n.find(item))
    }

    /// Returns `true` if some node holds an item equal to `item`.
    pub fn contains(&self, item: &T) -> bool
    where
        T: Ord,
    {
        self.find(item).is_some()
    }

    /// Adds `item` below the first empty slot found by descending from the root. Adding an item
    /// that is already present stores another copy of it to the right of the existing one.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(2);
    /// tree.add(2);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), vec![&2, &2]);
    /// ```
    pub fn add(&mut self, item: T)
    where
        T: Ord,
    {
        match self.root.as_deref_mut() {
            Some(root) => root.add(item),
            None => self.root = Some(Node::new_boxed(item)),
        }
        self.len += 1;
    }

    /// Removes one copy of `item` from the tree and returns the stored item.
    ///
    /// A node with two children is not unlinked. Instead it takes over the largest item of its
    /// left subtree and the node that held that item is unlinked in its place.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if the tree holds no item equal to `item`. The tree is left
    /// untouched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    /// use linked_bst::TreeError;
    ///
    /// let mut tree: Tree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Ok(5));
    /// assert_eq!(tree.remove(&5), Err(TreeError::NotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T, TreeError>
    where
        T: Ord,
    {
        if !self.contains(item) {
            log::trace!("remove: no matching item among {}", self.len);
            return Err(TreeError::NotFound);
        }

        // `self.root` is the slot above the root so removing the root needs no special case.
        // After the `contains` check above this descent always finds `item`.
        let removed = Node::remove_from(&mut self.root, item).ok_or(TreeError::NotFound)?;
        self.len -= 1;
        Ok(removed)
    }

    /// Overwrites the stored item equal to `item` with `new_item` and returns the old one, or
    /// `None` if there is no such item.
    ///
    /// The node isn't moved so `new_item` has to sort into the same place as `item` did. If it
    /// doesn't, later lookups may miss items.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let mut tree: Tree<_> = [(2, "b"), (1, "a")].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&(2, "b"), (2, "c")), Some((2, "b")));
    /// assert_eq!(tree.replace(&(7, "z"), (7, "y")), None);
    /// assert_eq!(tree.find(&(2, "c")), Some(&(2, "c")));
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T>
    where
        T: Ord,
    {
        let mut probe = self.root.as_deref_mut();
        while let Some(node) = probe {
            match item.cmp(&node.item) {
                Ordering::Equal => return Some(mem::replace(&mut node.item, new_item)),
                Ordering::Less => probe = node.left.as_deref_mut(),
                Ordering::Greater => probe = node.right.as_deref_mut(),
            }
        }
        None
    }

    /// The number of edges on the longest path from the root down to a leaf. Both an empty tree
    /// and a tree with a single node have a height of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.extend(1..=4);
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        self.root.as_deref().map_or(0, Node::levels).saturating_sub(1)
    }

    /// Whether the height of the tree is below `2 * log2(n + 1) - 1` where `n` is the number of
    /// nodes. `n` is counted from the nodes themselves rather than taken from [`Tree::len`].
    ///
    /// An empty tree is never balanced by this measure.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let mut tree: Tree<_> = (0..16).collect();
    /// assert!(!tree.is_balanced());
    ///
    /// tree.rebalance();
    /// assert!(tree.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        let nodes = self.root.as_deref().map_or(0, Node::count);
        (self.height() as f64) < 2.0 * ((nodes + 1) as f64).log2() - 1.0
    }

    /// Every item `x` with `low <= x <= high`, in sorted order. This walks the whole tree.
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T>
    where
        T: Ord,
    {
        self.inorder()
            .filter(|item| low <= *item && *item <= high)
            .collect()
    }

    /// Rebuilds the tree so it is as short as the items allow. The items are pulled out in sorted
    /// order and added back median first, then the medians of each half and so on.
    ///
    /// Duplicates still go to the right of their copies when added back so a tree with many
    /// copies of one item stays tall.
    pub fn rebalance(&mut self)
    where
        T: Ord,
    {
        let height = self.height();
        let items: Vec<T> = IntoIter::new(self.root.take()).collect();
        self.len = 0;

        log::debug!("rebalancing {} items of height {}", items.len(), height);
        self.add_medians(items);
        log::debug!("rebalanced to height {}", self.height());
    }

    fn add_medians(&mut self, mut items: Vec<T>)
    where
        T: Ord,
    {
        if items.is_empty() {
            return;
        }

        let mid = items.len() / 2;
        let upper = items.split_off(mid + 1);
        if let Some(median) = items.pop() {
            self.add(median);
        }
        self.add_medians(items);
        self.add_medians(upper);
    }

    /// The item that follows `item` in sorted order, whether or not `item` is in the tree. If the
    /// tree holds several copies of `item`, another copy is its successor. Otherwise it is the
    /// smallest item greater than `item`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let tree: Tree<_> = [1, 3, 5, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&5), Some(&7));
    /// assert_eq!(tree.successor(&6), Some(&7));
    /// assert_eq!(tree.successor(&9), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        if let Some(copy) = self.other_copy_of(item) {
            return Some(copy);
        }

        let mut best = None;
        let mut probe = self.root.as_deref();
        while let Some(node) = probe {
            if *item < node.item {
                best = Some(&node.item);
                probe = node.left.as_deref();
            } else {
                probe = node.right.as_deref();
            }
        }
        best
    }

    /// The largest item less than `item`, whether or not `item` is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let tree: Tree<_> = [1, 3, 5, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&5), Some(&3));
    /// assert_eq!(tree.predecessor(&4), Some(&3));
    /// assert_eq!(tree.predecessor(&1), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut best = None;
        let mut probe = self.root.as_deref();
        while let Some(node) = probe {
            if node.item < *item {
                best = Some(&node.item);
                probe = node.right.as_deref();
            } else {
                probe = node.left.as_deref();
            }
        }
        best
    }

    /// Finds a second copy of `item`.
    ///
    /// Every copy lives under the first node on the search path that holds one. Copies in its
    /// left subtree can only sit at the maximum and copies in its right subtree at the minimum.
    fn other_copy_of(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut probe = self.root.as_deref();
        while let Some(node) = probe {
            match item.cmp(&node.item) {
                Ordering::Less => probe = node.left.as_deref(),
                Ordering::Greater => probe = node.right.as_deref(),
                Ordering::Equal => {
                    let left_max = node.left.as_deref().map(Node::max);
                    let right_min = node.right.as_deref().map(Node::min);
                    return left_max
                        .into_iter()
                        .chain(right_min)
                        .find(|other| *other == item);
                }
            }
        }
        None
    }

    /// Visits each node before its children, the left subtree before the right.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::linked::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4].into_iter().collect();
    ///
    /// assert_eq!(tree.preorder().copied().collect::<Vec<_>>(), vec![5, 3, 1, 4, 8]);
    /// ```
    pub fn preorder(&self) -> Preorder<'_, T> {
        Preorder::new(self.root.as_deref())
    }

    /// Visits the items in sorted order.
    pub fn inorder(&self) -> Inorder<'_, T> {
        Inorder::new(self.root.as_deref())
    }
}

/// Builds a tree by adding the items one at a time in iteration order.
impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Preorder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.preorder()
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take())
    }
}

/// Draws the tree on its side with the root at the left margin and the right subtree on top.
/// Each level of depth adds a `"| "` in front of the item.
impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root.as_deref() {
            Some(root) => root.render(f, 0),
            None => Ok(()),
        }
    }
}

/// Drops every node under `link` without recursing so long chains can't overflow the stack.
pub(crate) fn release<T>(link: Link<T>) {
    let mut stack: Vec<Box<Node<T>>> = link.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(item: T) -> Box<Self> {
        Box::new(Node {
            item,
            left: None,
            right: None,
        })
    }

    /// How many levels are in the subtree rooted at this node. A node with no children has 1.
    fn levels(&self) -> usize {
        let left = self.left.as_deref().map_or(0, Node::levels);
        let right = self.right.as_deref().map_or(0, Node::levels);
        1 + left.max(right)
    }

    /// How many nodes are in the subtree rooted at this node.
    fn count(&self) -> usize {
        let left = self.left.as_deref().map_or(0, Node::count);
        let right = self.right.as_deref().map_or(0, Node::count);
        1 + left + right
    }

    fn min(&self) -> &T {
        let mut node = self;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        &node.item
    }

    fn max(&self) -> &T {
        let mut node = self;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        &node.item
    }

    fn find(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        match item.cmp(&self.item) {
            Ordering::Less => self.left.as_deref().and_then(|n| n.find(item)),
            Ordering::Equal => Some(&self.item),
            Ordering::Greater => self.right.as_deref().and_then(|n| n.find(item)),
        }
    }

    fn add(&mut self, item: T)
    where
        T: Ord,
    {
        if item < self.item {
            match self.left.as_deref_mut() {
                Some(left) => left.add(item),
                None => self.left = Some(Self::new_boxed(item)),
            }
        } else {
            match self.right.as_deref_mut() {
                Some(right) => right.add(item),
                None => self.right = Some(Self::new_boxed(item)),
            }
        }
    }

    /// Removes the first item equal to `item` found below `slot`, splicing nodes in `slot`'s
    /// subtree as needed. Returns `None` if there was no such item.
    fn remove_from(slot: &mut Link<T>, item: &T) -> Option<T>
    where
        T: Ord,
    {
        let node = slot.as_deref_mut()?;
        match item.cmp(&node.item) {
            Ordering::Less => Self::remove_from(&mut node.left, item),
            Ordering::Greater => Self::remove_from(&mut node.right, item),
            Ordering::Equal if node.left.is_some() && node.right.is_some() => {
                log::trace!("remove: lifting the left subtree's maximum");
                node.lift_max_in_left_subtree()
            }
            Ordering::Equal => {
                let mut removed = slot.take()?;
                *slot = match removed.left.take() {
                    None => removed.right.take(),
                    left => left,
                };
                Some(removed.item)
            }
        }
    }

    /// Moves the largest item of the left subtree into this node and returns the item this node
    /// held before. The node that held the largest item is unlinked.
    fn lift_max_in_left_subtree(&mut self) -> Option<T> {
        let max = Self::take_max(&mut self.left)?;
        Some(mem::replace(&mut self.item, max))
    }

    /// Unlinks the rightmost node below `slot` and returns its item. Its left child, if any,
    /// takes its place.
    fn take_max(slot: &mut Link<T>) -> Option<T> {
        let node = slot.as_deref_mut()?;
        if node.right.is_some() {
            return Self::take_max(&mut node.right);
        }

        let mut max = slot.take()?;
        *slot = max.left.take();
        Some(max.item)
    }
}

impl<T: fmt::Display> Node<T> {
    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if let Some(right) = self.right.as_deref() {
            right.render(f, depth + 1)?;
        }
        writeln!(f, "{}{}", "| ".repeat(depth), self.item)?;
        if let Some(left) = self.left.as_deref() {
            left.render(f, depth + 1)?;
        }
        Ok(())
    }
}
