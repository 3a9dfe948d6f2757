/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! A set kept in a self-adjusting binary search tree.
//!
//! Every `insert`, `search` and `delete` splays the key it touches (or the
//! last node on its search path) to the root, so recently used keys stay
//! cheap to reach.

use std::cmp::Ordering;
use std::fmt;

use compare::Compare;
use log::trace;

mod error;
mod traversal;
#[cfg(feature = "workload")]
pub mod workload;


pub use error::{DuplicateKeyError, EmptyTreeError, Error, Result};
pub use traversal::Traversal;

type Tree<K> = Option<Box<Node<K>>>;

struct Node<K> {
    // c[0] is the left child, c[1] the right one.
    c: [Tree<K>; 2],
    key: K,
}

impl<K> Node<K> {
    fn new(key: K) -> Node<K> {
        Node {
            c: [None, None],
            key,
        }
    }
    fn left(&self) -> Option<&Node<K>> {
        self.c[0].as_deref()
    }
    fn right(&self) -> Option<&Node<K>> {
        self.c[1].as_deref()
    }
}

// y is the parent of x, and x hangs on side_x of y.
// x takes y's place and y becomes x's child on the other side.
fn rotate_up<K>(
    mut x: Box<Node<K>>,
    mut y: Box<Node<K>>,
    side_x: bool,
) -> Box<Node<K>> {
    y.c[side_x as usize] = x.c[!side_x as usize].take();
    x.c[!side_x as usize] = Some(y);
    x
}

// `locate` tells where the target lies relative to a node's key. It is called
// once per node on the search path, from the root downwards.
//
// Returns the new subtree root: the target if present, otherwise the node at
// which the search ran off the tree.
fn splay<K, F>(tree: Tree<K>, locate: &mut F) -> Tree<K>
where
    F: FnMut(&K) -> Ordering,
{
    let mut root = tree?;
    let side = match locate(&root.key) {
        Ordering::Equal => return Some(root),
        res => res == Ordering::Greater,
    };
    let s = side as usize;
    let mut child = match root.c[s].take() {
        Some(child) => child,
        None => return Some(root),
    };
    match locate(&child.key) {
        Ordering::Equal => root.c[s] = Some(child),
        res => {
            let side_g = res == Ordering::Greater;
            let g = side_g as usize;
            child.c[g] = splay(child.c[g].take(), locate);
            if side_g == side {
                // zig-zig
                root = rotate_up(child, root, side);
            } else {
                // zig-zag, only when the grandchild subtree is not empty
                if let Some(grand) = child.c[g].take() {
                    child = rotate_up(grand, child, side_g);
                }
                root.c[s] = Some(child);
            }
        }
    }
    match root.c[s].take() {
        Some(child) => Some(rotate_up(child, root, side)),
        None => Some(root),
    }
}

// Plain BST insertion. Records the direction taken at every node so that the
// new leaf can be splayed without holding on to its key.
fn insert_leaf<K, C: Compare<K>>(
    tree: &mut Tree<K>,
    key: K,
    cmp: &C,
    path: &mut Vec<Ordering>,
) -> std::result::Result<(), DuplicateKeyError> {
    match tree {
        None => {
            *tree = Some(Box::new(Node::new(key)));
            Ok(())
        }
        Some(node) => {
            let res = cmp.compare(&key, &node.key);
            if res == Ordering::Equal {
                return Err(DuplicateKeyError);
            }
            path.push(res);
            let side = res == Ordering::Greater;
            insert_leaf(&mut node.c[side as usize], key, cmp, path)
        }
    }
}

/// Ascending order of `Ord` keys. The comparator of `SplayTree::new`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ascending;

impl<K: Ord + ?Sized> Compare<K> for Ascending {
    fn compare(&self, l: &K, r: &K) -> Ordering {
        l.cmp(r)
    }
}

/// A set of distinct keys stored in a splay tree.
///
/// The tree keeps no size or balance information: its shape is decided by
/// the order in which keys were accessed.
///
/// # Examples
///
/// ```
/// use splay_set::{SplayTree, Traversal};
///
/// let mut tree = SplayTree::new();
/// for key in [100, 50, 200] {
///     tree.insert(key).unwrap();
/// }
/// assert!(tree.insert(50).is_err());
///
/// assert!(tree.search(&100));
/// assert_eq!(tree.root_key(), Some(&100));
///
/// tree.delete(&50).unwrap();
/// assert_eq!(tree.traverse(Traversal::InOrder), vec![&100, &200]);
/// ```
pub struct SplayTree<K, C = Ascending> {
    root: Tree<K>,
    cmp: C,
}

impl<K: Ord> SplayTree<K> {
    pub fn new() -> SplayTree<K> {
        SplayTree::with_comparator(Ascending)
    }
}

impl<K: Ord> Default for SplayTree<K> {
    fn default() -> Self {
        SplayTree::new()
    }
}

impl<K, C> SplayTree<K, C> {
    /// An empty tree ordering its keys with `cmp`.
    ///
    /// ```
    /// use splay_set::{SplayTree, Traversal};
    ///
    /// let mut tree = SplayTree::with_comparator(|l: &i32, r: &i32| r.cmp(l));
    /// tree.insert(1).unwrap();
    /// tree.insert(2).unwrap();
    /// assert_eq!(tree.traverse(Traversal::InOrder), vec![&2, &1]);
    /// ```
    pub fn with_comparator(cmp: C) -> SplayTree<K, C> {
        SplayTree { root: None, cmp }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Key at the root. Does not restructure the tree.
    pub fn root_key(&self) -> Option<&K> {
        self.root.as_ref().map(|root| &root.key)
    }

    pub fn clear(&mut self) {
        drop_tree(self.root.take());
    }

    /// Keys in the given order. The tree is not modified.
    pub fn traverse(&self, order: Traversal) -> Vec<&K> {
        let mut out = Vec::new();
        self.traverse_into(order, &mut out);
        out
    }

    /// Appends the keys in the given order to `out`.
    pub fn traverse_into<'a>(&'a self, order: Traversal, out: &mut Vec<&'a K>) {
        order.walk(self.root.as_deref(), out);
    }
}

impl<K, C: Compare<K>> SplayTree<K, C> {
    fn splay_to_root(&mut self, key: &K) {
        let cmp = &self.cmp;
        self.root = splay(self.root.take(), &mut |k: &K| cmp.compare(key, k));
    }

    fn root_is(&self, key: &K) -> bool {
        match self.root {
            Some(ref root) => self.cmp.compare(key, &root.key) == Ordering::Equal,
            None => false,
        }
    }

    /// Adds `key` and makes it the root.
    ///
    /// Fails without touching the tree if the key is already present.
    pub fn insert(&mut self, key: K) -> std::result::Result<(), DuplicateKeyError> {
        let mut path = Vec::new();
        if let Err(e) = insert_leaf(&mut self.root, key, &self.cmp, &mut path) {
            trace!("insert rejected: key already present at depth {}", path.len());
            return Err(e);
        }
        // The comparisons against the nodes above the new leaf are exactly
        // the ones recorded on the way down.
        let mut path = path.into_iter();
        self.root = splay(self.root.take(), &mut |_: &K| {
            path.next().unwrap_or(Ordering::Equal)
        });
        Ok(())
    }

    /// Splays `key`, or its nearest neighbour on the search path, to the root
    /// and reports whether `key` is present.
    pub fn search(&mut self, key: &K) -> bool {
        self.splay_to_root(key);
        self.root_is(key)
    }

    /// Removes `key` if present. An absent key is not an error, but the tree
    /// is still splayed around it.
    pub fn delete(&mut self, key: &K) -> std::result::Result<(), EmptyTreeError> {
        if self.is_empty() {
            trace!("delete on an empty tree");
            return Err(EmptyTreeError);
        }
        self.splay_to_root(key);
        if !self.root_is(key) {
            return Ok(());
        }
        let mut root = match self.root.take() {
            Some(root) => root,
            None => return Ok(()),
        };
        let right = root.c[1].take();
        self.root = match root.c[0].take() {
            None => right,
            Some(left) => {
                // Everything compares greater, so the maximum comes up and
                // has a free right slot.
                let mut max =
                    splay(Some(left), &mut |_: &K| Ordering::Greater);
                if let Some(ref mut max) = max {
                    max.c[1] = right;
                }
                max
            }
        };
        Ok(())
    }

    /// Number of nodes on the path from the root to `key`, or to where `key`
    /// would be inserted. Counts the root. Does not restructure the tree.
    pub fn number_of_nodes(&self, key: &K) -> usize {
        let mut count = 0;
        let mut next = self.root.as_deref();
        while let Some(cur) = next {
            count += 1;
            next = match self.cmp.compare(key, &cur.key) {
                Ordering::Equal => break,
                Ordering::Less => cur.left(),
                Ordering::Greater => cur.right(),
            };
        }
        count
    }
}

fn drop_tree<K>(tree: Tree<K>) {
    let mut stack: Vec<Box<Node<K>>> = tree.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.c.iter_mut().filter_map(Option::take));
    }
}

impl<K, C> Drop for SplayTree<K, C> {
    fn drop(&mut self) {
        drop_tree(self.root.take());
    }
}

impl<K: fmt::Debug, C> fmt::Debug for SplayTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.traverse(Traversal::InOrder))
            .finish()
    }
}

fn fmt_subtree<K: fmt::Display>(
    rt: Option<&Node<K>>,
    prefix: &mut String,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let node = match rt {
        Some(node) => node,
        None => return writeln!(f, "/\\"),
    };
    let label = node.key.to_string();
    write!(f, "{}---", label)?;
    let ori_len = prefix.len();

    prefix.push('|');
    prefix.extend(std::iter::repeat(' ').take(label.len() + 2));
    fmt_subtree(node.left(), prefix, f)?;
    prefix.truncate(ori_len);

    writeln!(f, "{}|", prefix)?;
    write!(f, "{}+{}", prefix, "-".repeat(label.len() + 2))?;

    prefix.extend(std::iter::repeat(' ').take(label.len() + 3));
    fmt_subtree(node.right(), prefix, f)?;
    prefix.truncate(ori_len);
    Ok(())
}

/// Draws the tree sideways. Left children continue the line of their parent,
/// right children hang below it after a `+---` connector.
impl<K: fmt::Display, C> fmt::Display for SplayTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_subtree(self.root.as_deref(), &mut String::new(), f)
    }
}
