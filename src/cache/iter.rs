//! In-order traversal over a splay tree.

use crate::cache::entry::CacheEntry;

/// Ascending-key iterator over a subtree.
///
/// Uses an explicit stack so deep, chain-shaped trees are walked without
/// recursion. Read-only: never touches stamps or structure.
pub struct InOrder<'a> {
    stack: Vec<&'a CacheEntry>,
}

impl<'a> InOrder<'a> {
    pub fn new(root: Option<&'a CacheEntry>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a CacheEntry>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a CacheEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node)
    }
}
