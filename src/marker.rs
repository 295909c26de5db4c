//! Style markers for breakpoint-conditional styling.
//!
//! This module provides one opaque [`StyleMarker`] per breakpoint and the
//! [`MarkerFlags`] bitmask for tracking which markers a node holds. The
//! style engine on the toolkit side matches on marker names the way a CSS
//! engine matches pseudo-classes.

use bitflags::bitflags;

use crate::backend::WindowBackend;
use crate::breakpoint::Breakpoint;

bitflags! {
    /// Bitmask over the fixed marker set.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[must_use]
    pub struct MarkerFlags: u8 {
        const XS = 1;
        const SM = 2;
        const MD = 4;
        const LG = 8;
        const XL = 16;
    }
}

/// An opaque style-engine marker, one per [`Breakpoint`].
///
/// The engine drives every observed node toward holding exactly the marker
/// of the current breakpoint; style rules match on [`StyleMarker::name`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyleMarker(Breakpoint);

impl StyleMarker {
    pub const ALL: [StyleMarker; 5] = [
        StyleMarker(Breakpoint::Xs),
        StyleMarker(Breakpoint::Sm),
        StyleMarker(Breakpoint::Md),
        StyleMarker(Breakpoint::Lg),
        StyleMarker(Breakpoint::Xl),
    ];

    /// The single marker that is active for `breakpoint`.
    pub const fn for_breakpoint(breakpoint: Breakpoint) -> Self {
        StyleMarker(breakpoint)
    }

    pub const fn breakpoint(self) -> Breakpoint {
        self.0
    }

    pub const fn name(self) -> &'static str {
        match self.0 {
            Breakpoint::Xs => "screen-xs",
            Breakpoint::Sm => "screen-sm",
            Breakpoint::Md => "screen-md",
            Breakpoint::Lg => "screen-lg",
            Breakpoint::Xl => "screen-xl",
        }
    }

    pub const fn flag(self) -> MarkerFlags {
        match self.0 {
            Breakpoint::Xs => MarkerFlags::XS,
            Breakpoint::Sm => MarkerFlags::SM,
            Breakpoint::Md => MarkerFlags::MD,
            Breakpoint::Lg => MarkerFlags::LG,
            Breakpoint::Xl => MarkerFlags::XL,
        }
    }

    /// The complement of [`StyleMarker::for_breakpoint`] within the fixed set.
    pub fn inactive_for(breakpoint: Breakpoint) -> impl Iterator<Item = StyleMarker> {
        let active = Self::for_breakpoint(breakpoint);
        Self::ALL.into_iter().filter(move |marker| *marker != active)
    }
}

/// Drive a node's markers to match `tag`.
///
/// Two phases: deactivate the complement first, then activate the one
/// matching marker, so the node never settles with several markers set.
/// Idempotent; a node already consistent is rewritten to the same state.
pub(crate) fn restamp<W: WindowBackend>(w: &mut W, node: W::Node, tag: Breakpoint) {
    let active = StyleMarker::for_breakpoint(tag);
    for marker in StyleMarker::inactive_for(tag) {
        w.set_marker(node, marker, false);
    }
    w.set_marker(node, active, true);
}

/// Deactivate every marker on a node (detach/teardown path).
pub(crate) fn clear<W: WindowBackend>(w: &mut W, node: W::Node) {
    for marker in StyleMarker::ALL {
        w.set_marker(node, marker, false);
    }
}

#[cfg(test)]
mod tests {
    use super::{MarkerFlags, StyleMarker};
    use crate::breakpoint::Breakpoint;

    #[test]
    fn active_and_inactive_partition_the_set() {
        for &tag in Breakpoint::all() {
            let active = StyleMarker::for_breakpoint(tag);
            let inactive: Vec<_> = StyleMarker::inactive_for(tag).collect();
            assert_eq!(inactive.len(), StyleMarker::ALL.len() - 1);
            assert!(!inactive.contains(&active));
            let mut union = active.flag();
            for marker in &inactive {
                union |= marker.flag();
            }
            assert_eq!(union, MarkerFlags::all());
        }
    }

    #[test]
    fn names_are_distinct() {
        for a in StyleMarker::ALL {
            for b in StyleMarker::ALL {
                if a != b {
                    assert_ne!(a.name(), b.name());
                }
            }
        }
    }

    #[test]
    fn flags_are_distinct_single_bits() {
        for marker in StyleMarker::ALL {
            assert_eq!(marker.flag().bits().count_ones(), 1);
        }
    }
}
