//! Stylesheet identifiers and the per-breakpoint stylesheet mapping.
//!
//! Stylesheets are addressed by logical name, never by filesystem path; the
//! toolkit behind [`WindowBackend`](crate::backend::WindowBackend) owns
//! loading. The default mapping follows the `skin-*.css` naming convention,
//! one sheet per breakpoint.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::breakpoint::Breakpoint;
use crate::controller::ResponsiveError;

/// A logical stylesheet identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StylesheetRef(String);

impl StylesheetRef {
    pub fn new(name: impl Into<String>) -> Self {
        StylesheetRef(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StylesheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StylesheetRef {
    fn from(name: &str) -> Self {
        StylesheetRef::new(name)
    }
}

impl From<String> for StylesheetRef {
    fn from(name: String) -> Self {
        StylesheetRef::new(name)
    }
}

/// Statically configured mapping from breakpoint to stylesheet.
///
/// Configured once before the controller starts; read-only afterwards. A
/// breakpoint the active [`BreakpointTable`](crate::breakpoint::BreakpointTable)
/// can yield but that has no entry here is a configuration error and
/// surfaces at `start()`.
#[derive(Clone, Debug)]
pub struct StylesheetResolver {
    sheets: FxHashMap<Breakpoint, StylesheetRef>,
}

impl StylesheetResolver {
    /// The `skin-xs.css` … `skin-xl.css` convention, every tag mapped.
    pub fn skin_defaults() -> Self {
        let mut sheets = FxHashMap::default();
        for &tag in Breakpoint::all() {
            sheets.insert(tag, StylesheetRef::new(format!("skin-{}.css", tag.name())));
        }
        StylesheetResolver { sheets }
    }

    /// A resolver with no mappings at all.
    pub fn empty() -> Self {
        StylesheetResolver {
            sheets: FxHashMap::default(),
        }
    }

    /// Builder-style override for one breakpoint.
    pub fn with(mut self, tag: Breakpoint, sheet: impl Into<StylesheetRef>) -> Self {
        self.set(tag, sheet);
        self
    }

    pub fn set(&mut self, tag: Breakpoint, sheet: impl Into<StylesheetRef>) {
        self.sheets.insert(tag, sheet.into());
    }

    /// Look up the stylesheet for a breakpoint.
    pub fn resolve(&self, tag: Breakpoint) -> Result<&StylesheetRef, ResponsiveError> {
        self.sheets
            .get(&tag)
            .ok_or(ResponsiveError::NoStylesheetFor(tag))
    }
}

impl Default for StylesheetResolver {
    fn default() -> Self {
        Self::skin_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::{StylesheetRef, StylesheetResolver};
    use crate::breakpoint::Breakpoint;
    use crate::controller::ResponsiveError;

    #[test]
    fn defaults_follow_the_skin_convention() {
        let resolver = StylesheetResolver::skin_defaults();
        assert_eq!(
            resolver.resolve(Breakpoint::Xs).unwrap().name(),
            "skin-xs.css"
        );
        assert_eq!(
            resolver.resolve(Breakpoint::Xl).unwrap().name(),
            "skin-xl.css"
        );
        for &tag in Breakpoint::all() {
            assert!(resolver.resolve(tag).is_ok());
        }
    }

    #[test]
    fn unmapped_tag_surfaces_as_error() {
        let resolver = StylesheetResolver::empty();
        assert_eq!(
            resolver.resolve(Breakpoint::Md).unwrap_err(),
            ResponsiveError::NoStylesheetFor(Breakpoint::Md)
        );
    }

    #[test]
    fn builder_overrides_one_entry() {
        let resolver = StylesheetResolver::skin_defaults().with(Breakpoint::Lg, "desktop.css");
        assert_eq!(
            resolver.resolve(Breakpoint::Lg).unwrap(),
            &StylesheetRef::new("desktop.css")
        );
        assert_eq!(
            resolver.resolve(Breakpoint::Md).unwrap().name(),
            "skin-md.css"
        );
    }
}
