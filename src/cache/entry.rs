//! Cache Entry Module
//!
//! Defines the tree node that doubles as the cache record.

// == Link ==
/// Owned pointer to a subtree; `None` is the empty tree.
pub type Link = Option<Box<CacheEntry>>;

// == Cache Entry ==
/// A single cached key/value pair and its position in the splay tree.
///
/// Children are owned by their parent. There is no parent pointer: every
/// structural change works top-down by moving subtrees in and out of nodes.
#[derive(Debug)]
pub struct CacheEntry {
    /// Tree key, unique within a tree
    pub key: String,
    /// The stored value
    pub value: String,
    /// Logical time of the last get/put that touched this key
    pub last_access: u64,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a detached node stamped with `last_access`.
    pub fn new(key: String, value: String, last_access: u64) -> Self {
        Self {
            key,
            value,
            last_access,
            left: None,
            right: None,
        }
    }

    /// Boxed variant of [`CacheEntry::new`], ready to be linked into a tree.
    pub fn boxed(key: String, value: String, last_access: u64) -> Box<Self> {
        Box::new(Self::new(key, value, last_access))
    }

    // == Accessors ==
    /// Left subtree (all keys smaller than this node's key).
    pub fn left(&self) -> Option<&CacheEntry> {
        self.left.as_deref()
    }

    /// Right subtree (all keys greater than this node's key).
    pub fn right(&self) -> Option<&CacheEntry> {
        self.right.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    // == Touch ==
    /// Overwrites the value and refreshes the access stamp.
    pub fn update(&mut self, value: String, now: u64) {
        self.value = value;
        self.last_access = now;
    }
}

// == Teardown ==
/// Drops a whole subtree without recursion.
///
/// Splay trees can degenerate into long chains (ascending inserts build one),
/// and the default recursive `Box` drop would walk the full depth.
pub fn drop_tree(root: Link) {
    let mut stack: Vec<Box<CacheEntry>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        if let Some(left) = node.left.take() {
            stack.push(left);
        }
        if let Some(right) = node.right.take() {
            stack.push(right);
        }
    }
}
