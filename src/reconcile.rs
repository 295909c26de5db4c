//! Reconciliation of the managed flag with style-driven visibility.
//!
//! An invisible node must never consume layout space, but the application's
//! own choice of the managed flag has to survive the engine's overwrites so
//! it can be restored when the node is visible again. The reconciler keeps
//! that choice in an explicit side map, keyed by node identity: the first
//! touch captures the node's current flag as the baseline, and every later
//! pass writes `baseline` or `false` depending on visibility.
//!
//! Loop safety is structural. The reconciler's own writes run inside the
//! engine's exclusive borrow of the backend and are never routed to
//! [`managed_changed`](VisibilityReconciler::managed_changed); only
//! application-originated writes arrive there and re-capture the baseline.

use rustc_hash::FxHashMap;

use crate::backend::{NodeHandle, WindowBackend};

#[derive(Debug)]
pub struct VisibilityReconciler<N: NodeHandle> {
    baseline: FxHashMap<N, bool>,
}

impl<N: NodeHandle> VisibilityReconciler<N> {
    pub fn new() -> Self {
        VisibilityReconciler {
            baseline: FxHashMap::default(),
        }
    }

    /// Run one reconciliation step for a node.
    ///
    /// Captures the baseline on first touch, then drives the managed flag to
    /// `baseline` while the node is visible and to `false` while it is not.
    /// The write is skipped when the flag already matches, mirroring an
    /// observable property that coalesces same-value sets.
    pub fn reconcile<W: WindowBackend<Node = N>>(&mut self, w: &mut W, node: N) {
        let baseline = *self
            .baseline
            .entry(node)
            .or_insert_with(|| w.is_managed(node));
        let target = if w.is_visible(node) { baseline } else { false };
        if w.is_managed(node) != target {
            w.set_managed(node, target);
        }
    }

    /// Record an application-originated managed-flag change.
    ///
    /// The reported value becomes the new baseline, so explicit application
    /// intent wins once visibility allows it again. The one exception is a
    /// node that is invisible and unmanaged: that is the engine's own forced
    /// state, not something the application can be distinguished as having
    /// asked for, and an observable toolkit would have coalesced the write
    /// away regardless.
    pub fn managed_changed<W: WindowBackend<Node = N>>(&mut self, w: &W, node: N) {
        let Some(stored) = self.baseline.get_mut(&node) else {
            return;
        };
        let managed = w.is_managed(node);
        if managed || w.is_visible(node) {
            *stored = managed;
        }
    }

    /// Drop the stored baseline for a detached node. The next touch
    /// re-captures from whatever state the node carries then.
    pub fn forget(&mut self, node: N) {
        self.baseline.remove(&node);
    }

    /// Write the baseline back and drop it (teardown path).
    pub fn restore<W: WindowBackend<Node = N>>(&mut self, w: &mut W, node: N) {
        if let Some(baseline) = self.baseline.remove(&node)
            && w.is_managed(node) != baseline
        {
            w.set_managed(node, baseline);
        }
    }

    /// The stored baseline for a node, if one has been captured.
    pub fn baseline(&self, node: N) -> Option<bool> {
        self.baseline.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.baseline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baseline.is_empty()
    }
}

impl<N: NodeHandle> Default for VisibilityReconciler<N> {
    fn default() -> Self {
        Self::new()
    }
}
