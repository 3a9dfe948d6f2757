/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use serde::{Deserialize, Serialize};

use crate::Node;

/// Order in which `SplayTree::traverse` visits the nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree. Keys come out sorted.
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
}

impl Traversal {
    // Explicit stacks: a tree that has not been splayed into shape yet can be
    // a chain as long as the tree itself.
    pub(crate) fn walk<'a, K>(self, root: Option<&'a Node<K>>, out: &mut Vec<&'a K>) {
        let root = match root {
            Some(root) => root,
            None => return,
        };
        match self {
            Traversal::PreOrder => {
                let mut stack = vec![root];
                while let Some(node) = stack.pop() {
                    out.push(&node.key);
                    stack.extend(node.right());
                    stack.extend(node.left());
                }
            }
            Traversal::InOrder => {
                let mut stack = Vec::new();
                let mut next = Some(root);
                loop {
                    while let Some(node) = next {
                        stack.push(node);
                        next = node.left();
                    }
                    let node = match stack.pop() {
                        Some(node) => node,
                        None => break,
                    };
                    out.push(&node.key);
                    next = node.right();
                }
            }
            Traversal::PostOrder => {
                // Node, right, left reversed.
                let start = out.len();
                let mut stack = vec![root];
                while let Some(node) = stack.pop() {
                    out.push(&node.key);
                    stack.extend(node.left());
                    stack.extend(node.right());
                }
                out[start..].reverse();
            }
        }
    }
}
