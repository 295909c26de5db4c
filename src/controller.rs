//! The top-level responsive controller.
//!
//! One controller handles one window: classify its width, keep the matching
//! stylesheet active, and keep every node in its tree stamped with the
//! current breakpoint marker and reconciled for visibility. The host event
//! loop drives the controller through its entry points; all work is
//! synchronous and completes before the next notification is processed.

use std::error::Error;
use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::backend::WindowBackend;
use crate::breakpoint::{Breakpoint, BreakpointTable};
use crate::marker;
use crate::observer::TreeObserver;
use crate::reconcile::VisibilityReconciler;
use crate::stylesheet::{StylesheetRef, StylesheetResolver};

new_key_type! {
    /// Handle for a registered breakpoint-change listener.
    pub struct ListenerKey;
}

type BreakpointCallback = Box<dyn FnMut(Breakpoint, Breakpoint)>;

/// Errors surfaced by [`ResponsiveController::start`] and
/// [`ResponsiveController::width_changed`].
///
/// Configuration problems surface once, at `start()` or at the first
/// transition into the affected breakpoint; steady-state operation never
/// errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponsiveError {
    /// `start()` was called on a controller that is already started.
    AlreadyStarted,
    /// The resolver has no stylesheet mapped for a breakpoint the table can
    /// yield.
    NoStylesheetFor(Breakpoint),
    /// The toolkit could not load the referenced stylesheet asset.
    StylesheetNotFound(StylesheetRef),
}

impl fmt::Display for ResponsiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponsiveError::AlreadyStarted => {
                write!(f, "responsive controller is already started")
            }
            ResponsiveError::NoStylesheetFor(tag) => {
                write!(f, "no stylesheet configured for breakpoint {tag}")
            }
            ResponsiveError::StylesheetNotFound(sheet) => {
                write!(f, "stylesheet {sheet} not found")
            }
        }
    }
}

impl Error for ResponsiveError {}

/// Configuration for a [`ResponsiveController`], built before `start()` and
/// read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct ResponsiveConfig {
    breakpoints: BreakpointTable,
    stylesheets: StylesheetResolver,
}

impl ResponsiveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn breakpoints(mut self, table: BreakpointTable) -> Self {
        self.breakpoints = table;
        self
    }

    pub fn stylesheets(mut self, resolver: StylesheetResolver) -> Self {
        self.stylesheets = resolver;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Stopped,
    Started { current: Breakpoint },
}

/// Adds responsive design to a window: breakpoint classification, stylesheet
/// swapping, per-node breakpoint markers, and visibility reconciliation
/// across the live tree.
pub struct ResponsiveController<W: WindowBackend> {
    table: BreakpointTable,
    stylesheets: StylesheetResolver,
    phase: Phase,
    observer: TreeObserver<W::Node>,
    reconciler: VisibilityReconciler<W::Node>,
    listeners: SlotMap<ListenerKey, BreakpointCallback>,
}

impl<W: WindowBackend> ResponsiveController<W> {
    pub fn new(config: ResponsiveConfig) -> Self {
        ResponsiveController {
            table: config.breakpoints,
            stylesheets: config.stylesheets,
            phase: Phase::Stopped,
            observer: TreeObserver::new(),
            reconciler: VisibilityReconciler::new(),
            listeners: SlotMap::with_key(),
        }
    }

    /// The breakpoint matching the window's width, or `None` while stopped.
    pub fn current_breakpoint(&self) -> Option<Breakpoint> {
        match self.phase {
            Phase::Stopped => None,
            Phase::Started { current } => Some(current),
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self.phase, Phase::Started { .. })
    }

    /// Register a listener fired on breakpoint transitions with the old and
    /// new tag. Transitions only: width ticks that stay inside the current
    /// band fire nothing, and neither does `start()` itself.
    pub fn on_breakpoint_changed(
        &mut self,
        listener: impl FnMut(Breakpoint, Breakpoint) + 'static,
    ) -> ListenerKey {
        self.listeners.insert(Box::new(listener))
    }

    /// Remove a previously registered listener. Returns whether it existed.
    pub fn remove_listener(&mut self, key: ListenerKey) -> bool {
        self.listeners.remove(key).is_some()
    }

    /// Start handling the window.
    ///
    /// Validates that every breakpoint the table can yield has a stylesheet
    /// mapping, classifies the current width, applies the matching
    /// stylesheet, then installs observation over the whole tree: every node
    /// gets current markers and a reconciled managed flag, and a layout pass
    /// is requested.
    pub fn start(&mut self, w: &mut W) -> Result<(), ResponsiveError> {
        if self.is_started() {
            return Err(ResponsiveError::AlreadyStarted);
        }
        for tag in self.table.tags() {
            self.stylesheets.resolve(tag)?;
        }
        let tag = self.table.classify(w.width());
        let sheet = self.stylesheets.resolve(tag)?.clone();
        w.swap_stylesheet(&sheet)?;
        self.phase = Phase::Started { current: tag };
        for node in self.observer.install(w) {
            self.attach_node(w, node, tag);
        }
        w.request_layout();
        Ok(())
    }

    /// Reverse [`start`](Self::start): clear every marker, restore every
    /// node's managed flag to its stored baseline, and drop all observation
    /// state. Idempotent; a stopped controller ignores all entry points
    /// until started again.
    pub fn stop(&mut self, w: &mut W) {
        if !self.is_started() {
            return;
        }
        for node in self.observer.uninstall() {
            marker::clear(w, node);
            self.reconciler.restore(w, node);
        }
        self.phase = Phase::Stopped;
        w.request_layout();
    }

    /// Process a width change.
    ///
    /// On a tag transition the stylesheet is swapped and listeners fire;
    /// in every case the full tree is resynced (markers re-stamped and
    /// visibility reconciled), since node visibility may have changed for
    /// reasons unrelated to the breakpoint. NaN widths are ignored.
    pub fn width_changed(&mut self, w: &mut W) -> Result<(), ResponsiveError> {
        let Phase::Started { current } = self.phase else {
            return Ok(());
        };
        let width = w.width();
        if width.is_nan() {
            return Ok(());
        }
        let tag = self.table.classify(width);
        if tag != current {
            let sheet = self.stylesheets.resolve(tag)?.clone();
            w.swap_stylesheet(&sheet)?;
            self.phase = Phase::Started { current: tag };
            self.notify(current, tag);
        }
        self.resync(w, tag);
        w.request_layout();
        Ok(())
    }

    /// Process a structural change in the tree.
    ///
    /// Nodes that left the tree get their markers cleared and their stored
    /// baseline dropped; nodes that entered get current markers and a fresh
    /// reconciliation, without any width change. A moved node is both, in
    /// that order.
    pub fn structure_changed(&mut self, w: &mut W) {
        let Phase::Started { current } = self.phase else {
            return;
        };
        let delta = self.observer.sync(w);
        if delta.is_empty() {
            return;
        }
        for &node in &delta.detached {
            self.detach_node(w, node);
        }
        for &node in &delta.attached {
            self.attach_node(w, node, current);
        }
        w.request_layout();
    }

    /// Record an application-originated write to a node's managed flag.
    ///
    /// Hosts call this for writes the application makes directly; the
    /// engine's own corrective writes never arrive here (see the
    /// [`WindowBackend`] contract), which is what keeps the reconciliation
    /// free of feedback cycles.
    pub fn managed_changed(&mut self, w: &W, node: W::Node) {
        if !self.is_started() || !self.observer.is_observed(node) {
            return;
        }
        self.reconciler.managed_changed(w, node);
    }

    fn resync(&mut self, w: &mut W, tag: Breakpoint) {
        let nodes: Vec<W::Node> = self.observer.nodes().collect();
        for node in nodes {
            marker::restamp(w, node, tag);
            self.reconciler.reconcile(w, node);
        }
    }

    fn attach_node(&mut self, w: &mut W, node: W::Node, tag: Breakpoint) {
        marker::restamp(w, node, tag);
        self.reconciler.reconcile(w, node);
    }

    fn detach_node(&mut self, w: &mut W, node: W::Node) {
        marker::clear(w, node);
        self.reconciler.forget(node);
    }

    fn notify(&mut self, old: Breakpoint, new: Breakpoint) {
        for listener in self.listeners.values_mut() {
            listener(old, new);
        }
    }
}
