//! # Reflow
//! Reflow adds responsive design to a windowed Rust UI: it classifies the
//! window's width into a discrete breakpoint, keeps the matching stylesheet
//! active, and stamps a per-breakpoint style marker onto every node in the
//! window's visual tree, so style rules can show, hide, or re-skin nodes per
//! breakpoint without the application writing any width-checking code.
//!
//! ## Example
//! ```rust
//! use reflow::headless::HeadlessWindow;
//! use reflow::{Breakpoint, ResponsiveConfig, ResponsiveController};
//!
//! let mut window = HeadlessWindow::new(350.0);
//! let sidebar = window.add_node(window.root_id());
//!
//! let mut controller = ResponsiveController::new(ResponsiveConfig::new());
//! controller.on_breakpoint_changed(|old, new| {
//!     println!("breakpoint changed: {old} -> {new}");
//! });
//! controller.start(&mut window).unwrap();
//! assert_eq!(controller.current_breakpoint(), Some(Breakpoint::Xs));
//!
//! window.set_width(1000.0);
//! controller.width_changed(&mut window).unwrap();
//! assert_eq!(controller.current_breakpoint(), Some(Breakpoint::Lg));
//! # let _ = sidebar;
//! ```
//!
//! ## How it works
//!
//! A [`ResponsiveController`] sits between the host toolkit and the crate's
//! engine. The toolkit side is the [`WindowBackend`] trait: current width,
//! the node tree, per-node `visible` / `managed` flags, opaque style
//! markers, and the window's stylesheet list. The host event loop forwards
//! its notifications (width changed, tree changed, managed flag changed by
//! the application) to the controller's entry points; each entry point runs
//! to completion before the next, so no two resync passes ever interleave.
//!
//! On every width tick the whole tree is resynced: each observed node is
//! driven to hold exactly the marker of the current breakpoint
//! ([`StyleMarker`]), and each node's layout participation is reconciled
//! with its visibility: an invisible node never consumes layout space,
//! while the application's own choice of the managed flag is preserved and
//! restored once the node is visible again
//! ([`VisibilityReconciler`](reconcile::VisibilityReconciler)).
//!
//! Breakpoint thresholds are configuration, not code: a
//! [`BreakpointTable`] is a validated list of upper-exclusive bounds, with
//! the four-tier [`BreakpointTable::bootstrap`] table as default.

pub mod backend;
pub mod breakpoint;
pub mod controller;
pub mod headless;
pub mod marker;
pub mod observer;
pub mod reconcile;
pub mod stylesheet;

pub use backend::{NodeHandle, WindowBackend};
pub use breakpoint::{Breakpoint, BreakpointTable, TableError};
pub use controller::{ListenerKey, ResponsiveConfig, ResponsiveController, ResponsiveError};
pub use marker::{MarkerFlags, StyleMarker};
pub use observer::{TreeDelta, TreeObserver};
pub use reconcile::VisibilityReconciler;
pub use stylesheet::{StylesheetRef, StylesheetResolver};
