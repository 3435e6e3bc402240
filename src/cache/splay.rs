//! Splay Tree Module
//!
//! Rotations, splaying and the structural operations built on top of them.
//! Every function takes ownership of a subtree and hands back the new subtree
//! owner, so the tree is never aliased while it is being restructured.

use std::cmp::Ordering;

use crate::cache::entry::{CacheEntry, Link};

// == Rotations ==
/// Promotes the left child of `node` to subtree root.
///
/// The left child's right subtree becomes `node`'s left subtree. A node with no
/// left child is returned unchanged.
pub fn rotate_right(mut node: Box<CacheEntry>) -> Box<CacheEntry> {
    match node.left.take() {
        Some(mut pivot) => {
            node.left = pivot.right.take();
            pivot.right = Some(node);
            pivot
        }
        None => node,
    }
}

/// Mirror of [`rotate_right`]: promotes the right child of `node`.
pub fn rotate_left(mut node: Box<CacheEntry>) -> Box<CacheEntry> {
    match node.right.take() {
        Some(mut pivot) => {
            node.right = pivot.left.take();
            pivot.left = Some(node);
            pivot
        }
        None => node,
    }
}

// == Splay ==
/// Which two-level pattern a descent step took below a node.
#[derive(Debug, Clone, Copy)]
enum Step {
    ZigZig,
    ZigZag,
    ZagZig,
    ZagZag,
}

/// One pending level of a splay: `node` with `child` detached from it, and
/// the grandchild subtree on the `step` side detached from `child`.
struct Frame {
    node: Box<CacheEntry>,
    child: Box<CacheEntry>,
    step: Step,
}

/// Splays the subtree rooted at `node` toward `key`.
///
/// If `key` is present it ends up at the root. Otherwise the last node on the
/// search path (an in-order neighbour of `key`) does.
///
/// The descent goes two levels at a time and parks each level on an explicit
/// stack, then the rotations are applied bottom-up while unwinding it, so
/// chain-shaped trees of any depth are handled without recursion.
pub fn splay(node: Link, key: &str) -> Link {
    let mut path: Vec<Frame> = Vec::new();
    let mut current = node;

    // Descend until the remaining subtree is settled
    let mut splayed = loop {
        let Some(mut node) = current else {
            break None;
        };

        match key.cmp(node.key.as_str()) {
            Ordering::Equal => break Some(node),
            Ordering::Less => {
                let Some(mut left) = node.left.take() else {
                    break Some(node);
                };
                match key.cmp(left.key.as_str()) {
                    Ordering::Less => {
                        current = left.left.take();
                        path.push(Frame { node, child: left, step: Step::ZigZig });
                    }
                    Ordering::Greater => {
                        current = left.right.take();
                        path.push(Frame { node, child: left, step: Step::ZigZag });
                    }
                    Ordering::Equal => {
                        node.left = Some(left);
                        break Some(rotate_right(node));
                    }
                }
            }
            Ordering::Greater => {
                let Some(mut right) = node.right.take() else {
                    break Some(node);
                };
                match key.cmp(right.key.as_str()) {
                    Ordering::Less => {
                        current = right.left.take();
                        path.push(Frame { node, child: right, step: Step::ZagZig });
                    }
                    Ordering::Greater => {
                        current = right.right.take();
                        path.push(Frame { node, child: right, step: Step::ZagZag });
                    }
                    Ordering::Equal => {
                        node.right = Some(right);
                        break Some(rotate_left(node));
                    }
                }
            }
        }
    };

    // Reattach each parked level and rotate, deepest first
    while let Some(Frame {
        mut node,
        mut child,
        step,
    }) = path.pop()
    {
        splayed = Some(match step {
            Step::ZigZig => {
                child.left = splayed;
                node.left = Some(child);
                node = rotate_right(node);
                if node.left.is_some() {
                    rotate_right(node)
                } else {
                    node
                }
            }
            Step::ZigZag => {
                child.right = splayed;
                if child.right.is_some() {
                    child = rotate_left(child);
                }
                node.left = Some(child);
                rotate_right(node)
            }
            Step::ZagZig => {
                child.left = splayed;
                if child.left.is_some() {
                    child = rotate_right(child);
                }
                node.right = Some(child);
                rotate_left(node)
            }
            Step::ZagZag => {
                child.right = splayed;
                node.right = Some(child);
                node = rotate_left(node);
                if node.right.is_some() {
                    rotate_left(node)
                } else {
                    node
                }
            }
        });
    }

    splayed
}

// == Find ==
/// Plain BST descent that does not restructure anything.
///
/// Returns the node holding `key`, or on a miss the last node visited. Callers
/// compare the returned key against `key` to tell the two apart.
pub fn find<'a>(root: Option<&'a CacheEntry>, key: &str) -> Option<&'a CacheEntry> {
    let mut node = root?;
    loop {
        let next = match key.cmp(node.key.as_str()) {
            Ordering::Equal => return Some(node),
            Ordering::Less => node.left.as_deref(),
            Ordering::Greater => node.right.as_deref(),
        };
        match next {
            Some(child) => node = child,
            None => return Some(node),
        }
    }
}

// == Insert ==
/// Inserts `entry` by splaying toward its key and splitting the result.
///
/// The new node always becomes the root. If the key turns out to be present
/// already, the existing root takes over the entry's value and stamp instead.
pub fn insert(root: Link, mut entry: Box<CacheEntry>) -> Box<CacheEntry> {
    let Some(mut top) = splay(root, &entry.key) else {
        return entry;
    };

    match entry.key.cmp(&top.key) {
        Ordering::Equal => {
            let value = std::mem::take(&mut entry.value);
            top.update(value, entry.last_access);
            top
        }
        Ordering::Less => {
            entry.left = top.left.take();
            entry.right = Some(top);
            entry
        }
        Ordering::Greater => {
            entry.right = top.right.take();
            entry.left = Some(top);
            entry
        }
    }
}

// == Erase ==
/// Removes `key` from the subtree, returning the new root and the detached node.
///
/// The tree is splayed toward `key` first; if the key is absent the splayed
/// tree comes back with `None` as the removed node.
pub fn erase(root: Link, key: &str) -> (Link, Option<Box<CacheEntry>>) {
    let Some(mut top) = splay(root, key) else {
        return (None, None);
    };
    if top.key != key {
        return (Some(top), None);
    }

    let right = top.right.take();
    let new_root = match top.left.take() {
        None => right,
        Some(left) => {
            let (rest, mut max) = take_max(left);
            max.left = rest;
            max.right = right;
            Some(max)
        }
    };

    (new_root, Some(top))
}

/// Detaches the rightmost node of a subtree.
///
/// Rotates the right spine up until the maximum sits at the top, then splits
/// off its left subtree. Returns what remains of the subtree and the detached
/// maximum, which has no right child.
fn take_max(mut node: Box<CacheEntry>) -> (Link, Box<CacheEntry>) {
    while node.right.is_some() {
        node = rotate_left(node);
    }
    let rest = node.left.take();
    (rest, node)
}
