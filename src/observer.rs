//! Live-tree observation by snapshot diffing.
//!
//! The observer keeps a `node → parent` snapshot of the tree it watches.
//! [`sync`](TreeObserver::sync) re-walks the live tree and diffs against the
//! snapshot: nodes that left are detached, nodes that entered are attached,
//! and a node whose parent changed is both (state is not assumed preserved
//! across a move). The controller runs detach work strictly before attach
//! work, so a moved node is always re-set-up from scratch.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::backend::{NodeHandle, WindowBackend};

/// Result of one [`TreeObserver::sync`] pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDelta<N> {
    /// Nodes that entered the tree (or moved), depth-first order.
    pub attached: Vec<N>,
    /// Nodes that left the tree (or moved).
    pub detached: Vec<N>,
}

impl<N> TreeDelta<N> {
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty() && self.detached.is_empty()
    }
}

#[derive(Debug)]
pub struct TreeObserver<N: NodeHandle> {
    tracked: FxHashMap<N, Option<N>>,
}

impl<N: NodeHandle> TreeObserver<N> {
    pub fn new() -> Self {
        TreeObserver {
            tracked: FxHashMap::default(),
        }
    }

    pub fn is_observed(&self, node: N) -> bool {
        self.tracked.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Every observed node. Iteration order is unspecified; per-node work
    /// driven from this must be order-independent.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.tracked.keys().copied()
    }

    /// Record the full live tree and return it in depth-first order.
    ///
    /// Any previous observation state is discarded.
    pub fn install<W: WindowBackend<Node = N>>(&mut self, w: &W) -> Vec<N> {
        self.tracked.clear();
        walk(w, &mut self.tracked)
    }

    /// Diff the live tree against the snapshot.
    ///
    /// A node present in both but under a different parent appears in both
    /// lists: it was moved, and the caller treats that as one detach plus
    /// one attach.
    pub fn sync<W: WindowBackend<Node = N>>(&mut self, w: &W) -> TreeDelta<N> {
        let mut next: FxHashMap<N, Option<N>> = FxHashMap::default();
        let order = walk(w, &mut next);

        let mut detached: Vec<N> = self
            .tracked
            .keys()
            .copied()
            .filter(|node| !next.contains_key(node))
            .collect();
        let mut attached = Vec::new();
        for node in order {
            match self.tracked.get(&node) {
                None => attached.push(node),
                Some(old_parent) if *old_parent != next[&node] => {
                    detached.push(node);
                    attached.push(node);
                }
                Some(_) => {}
            }
        }

        self.tracked = next;
        TreeDelta { attached, detached }
    }

    /// Drop all observation state, returning every node that was observed.
    pub fn uninstall(&mut self) -> Vec<N> {
        self.tracked.drain().map(|(node, _)| node).collect()
    }
}

impl<N: NodeHandle> Default for TreeObserver<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first walk from the backend's root, recording each node's parent.
/// A node reachable twice (malformed tree) is visited once; first visit wins.
fn walk<W: WindowBackend>(
    w: &W,
    into: &mut FxHashMap<W::Node, Option<W::Node>>,
) -> Vec<W::Node> {
    let mut order = Vec::new();
    let Some(root) = w.root() else {
        return order;
    };
    let mut stack: SmallVec<[(W::Node, Option<W::Node>); 16]> = SmallVec::new();
    stack.push((root, None));
    while let Some((node, parent)) = stack.pop() {
        if into.contains_key(&node) {
            continue;
        }
        into.insert(node, parent);
        order.push(node);
        let children = w.children(node);
        for child in children.into_iter().rev() {
            stack.push((child, Some(node)));
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::TreeObserver;
    use crate::headless::HeadlessWindow;

    #[test]
    fn install_covers_the_whole_tree_depth_first() {
        let mut w = HeadlessWindow::new(800.0);
        let root = w.root_id();
        let a = w.add_node(root);
        let a1 = w.add_node(a);
        let a2 = w.add_node(a);
        let b = w.add_node(root);

        let mut observer = TreeObserver::new();
        let order = observer.install(&w);
        assert_eq!(order, vec![root, a, a1, a2, b]);
        assert_eq!(observer.len(), 5);
        assert!(observer.is_observed(a2));
    }

    #[test]
    fn sync_reports_added_subtrees() {
        let mut w = HeadlessWindow::new(800.0);
        let root = w.root_id();
        let mut observer = TreeObserver::new();
        observer.install(&w);

        let a = w.add_node(root);
        let a1 = w.add_node(a);
        let delta = observer.sync(&w);
        assert_eq!(delta.attached, vec![a, a1]);
        assert!(delta.detached.is_empty());
        assert!(observer.is_observed(a1));
    }

    #[test]
    fn sync_reports_removed_subtrees() {
        let mut w = HeadlessWindow::new(800.0);
        let root = w.root_id();
        let a = w.add_node(root);
        let a1 = w.add_node(a);
        let mut observer = TreeObserver::new();
        observer.install(&w);

        w.detach(a);
        let delta = observer.sync(&w);
        assert!(delta.attached.is_empty());
        let mut detached = delta.detached.clone();
        detached.sort();
        let mut expected = vec![a, a1];
        expected.sort();
        assert_eq!(detached, expected);
        assert!(!observer.is_observed(a1));
    }

    #[test]
    fn reparented_node_is_detached_then_attached() {
        let mut w = HeadlessWindow::new(800.0);
        let root = w.root_id();
        let left = w.add_node(root);
        let right = w.add_node(root);
        let child = w.add_node(left);
        let mut observer = TreeObserver::new();
        observer.install(&w);

        w.detach(child);
        w.attach(right, child);
        let delta = observer.sync(&w);
        assert_eq!(delta.detached, vec![child]);
        assert_eq!(delta.attached, vec![child]);
    }

    #[test]
    fn unchanged_tree_yields_an_empty_delta() {
        let mut w = HeadlessWindow::new(800.0);
        let root = w.root_id();
        w.add_node(root);
        let mut observer = TreeObserver::new();
        observer.install(&w);
        assert!(observer.sync(&w).is_empty());
    }

    #[test]
    fn uninstall_drains_everything() {
        let mut w = HeadlessWindow::new(800.0);
        let root = w.root_id();
        let a = w.add_node(root);
        let mut observer = TreeObserver::new();
        observer.install(&w);

        let mut drained = observer.uninstall();
        drained.sort();
        let mut expected = vec![root, a];
        expected.sort();
        assert_eq!(drained, expected);
        assert!(observer.is_empty());
        assert!(observer.uninstall().is_empty());
    }
}
