//! Headless window implementation for tests and embedding experiments.
//!
//! [`HeadlessWindow`] is a complete in-memory [`WindowBackend`]: a slotmap
//! node arena with per-node flags and markers, a window width, an ordered
//! stylesheet list with one engine-owned slot, and a registry of loadable
//! stylesheet assets so the missing-resource path can be exercised.
//!
//! Node records survive detachment from the tree, as the node objects of a
//! retained-mode toolkit do: a detached node keeps its flags and can be
//! re-attached later.

use rustc_hash::FxHashSet;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::backend::WindowBackend;
use crate::breakpoint::Breakpoint;
use crate::controller::ResponsiveError;
use crate::marker::{MarkerFlags, StyleMarker};
use crate::stylesheet::{StylesheetRef, StylesheetResolver};

new_key_type! {
    /// A small unique identifier for a node in a [`HeadlessWindow`] tree.
    pub struct NodeId;
}

#[derive(Debug, Clone)]
struct NodeData {
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    visible: bool,
    managed: bool,
    markers: MarkerFlags,
}

impl Default for NodeData {
    fn default() -> Self {
        NodeData {
            parent: None,
            children: SmallVec::new(),
            visible: true,
            managed: true,
            markers: MarkerFlags::empty(),
        }
    }
}

#[derive(Debug)]
pub struct HeadlessWindow {
    width: f64,
    nodes: SlotMap<NodeId, NodeData>,
    root: NodeId,
    stylesheets: Vec<StylesheetRef>,
    engine_sheet: Option<StylesheetRef>,
    assets: FxHashSet<String>,
    layout_requests: u32,
}

impl HeadlessWindow {
    /// A window of the given width with a fresh root node and the default
    /// `skin-*.css` assets available.
    pub fn new(width: f64) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::default());
        let resolver = StylesheetResolver::skin_defaults();
        let mut assets = FxHashSet::default();
        for &tag in Breakpoint::all() {
            if let Ok(sheet) = resolver.resolve(tag) {
                assets.insert(sheet.name().to_string());
            }
        }
        HeadlessWindow {
            width,
            nodes,
            root,
            stylesheets: Vec::new(),
            engine_sheet: None,
            assets,
            layout_requests: 0,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// Create a new node under `parent`.
    pub fn add_node(&mut self, parent: NodeId) -> NodeId {
        let node = self.nodes.insert(NodeData::default());
        self.attach(parent, node);
        node
    }

    /// Attach a detached node (with its subtree) under `parent`.
    pub fn attach(&mut self, parent: NodeId, node: NodeId) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(node) {
            return;
        }
        self.detach(node);
        self.nodes[parent].children.push(node);
        self.nodes[node].parent = Some(parent);
    }

    /// Remove a node from its parent. The subtree stays intact below it and
    /// every record keeps its flags; the node can be re-attached.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(node).and_then(|data| data.parent) else {
            return;
        };
        self.nodes[parent].children.retain(|child| *child != node);
        self.nodes[node].parent = None;
    }

    /// Destroy a node and its whole subtree.
    pub fn drop_node(&mut self, node: NodeId) {
        self.detach(node);
        let mut stack = vec![node];
        while let Some(node) = stack.pop() {
            if let Some(data) = self.nodes.remove(node) {
                stack.extend(data.children);
            }
        }
    }

    pub fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.visible = visible;
        }
    }

    /// Markers currently held by a node.
    pub fn markers(&self, node: NodeId) -> MarkerFlags {
        self.nodes
            .get(node)
            .map(|data| data.markers)
            .unwrap_or_default()
    }

    /// The window's ordered stylesheet list.
    pub fn active_stylesheets(&self) -> &[StylesheetRef] {
        &self.stylesheets
    }

    /// Append an application-owned stylesheet entry.
    pub fn push_stylesheet(&mut self, sheet: impl Into<StylesheetRef>) {
        self.stylesheets.push(sheet.into());
    }

    /// Make a stylesheet asset loadable.
    pub fn add_asset(&mut self, name: impl Into<String>) {
        self.assets.insert(name.into());
    }

    /// Remove a stylesheet asset, simulating a missing packaged resource.
    pub fn remove_asset(&mut self, name: &str) -> bool {
        self.assets.remove(name)
    }

    pub fn layout_requests(&self) -> u32 {
        self.layout_requests
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl WindowBackend for HeadlessWindow {
    type Node = NodeId;

    fn width(&self) -> f64 {
        self.width
    }

    fn root(&self) -> Option<NodeId> {
        Some(self.root)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node)
            .map(|data| data.children.to_vec())
            .unwrap_or_default()
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|data| data.visible)
    }

    fn is_managed(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|data| data.managed)
    }

    fn set_managed(&mut self, node: NodeId, managed: bool) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.managed = managed;
        }
    }

    fn set_marker(&mut self, node: NodeId, marker: StyleMarker, active: bool) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.markers.set(marker.flag(), active);
        }
    }

    fn swap_stylesheet(&mut self, sheet: &StylesheetRef) -> Result<(), ResponsiveError> {
        if !self.assets.contains(sheet.name()) {
            return Err(ResponsiveError::StylesheetNotFound(sheet.clone()));
        }
        if let Some(old) = self.engine_sheet.take() {
            self.stylesheets.retain(|entry| *entry != old);
        }
        self.stylesheets.push(sheet.clone());
        self.engine_sheet = Some(sheet.clone());
        Ok(())
    }

    fn request_layout(&mut self) {
        self.layout_requests += 1;
    }
}
