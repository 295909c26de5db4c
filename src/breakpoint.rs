//! Breakpoint tags and width classification.
//!
//! A [`BreakpointTable`] slices the non-negative width axis into contiguous
//! half-open bands, each mapped to one [`Breakpoint`]. Classification is
//! total and monotonic: every width lands in exactly one band, and wider
//! windows never classify to a smaller tag.

use std::error::Error;
use std::fmt;
use std::ops::{Range, RangeFrom};

/// A named width class, ordered from narrowest to widest.
///
/// The set is closed: a table may use a prefix of these (the default
/// four-tier table never yields [`Breakpoint::Xl`]), but never more.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    pub const fn all() -> &'static [Breakpoint] {
        &[
            Breakpoint::Xs,
            Breakpoint::Sm,
            Breakpoint::Md,
            Breakpoint::Lg,
            Breakpoint::Xl,
        ]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from [`BreakpointTable::with_bounds`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableError {
    /// A bound is NaN or infinite.
    NonFinite,
    /// A bound is zero or negative.
    NonPositive,
    /// Bounds are not strictly ascending.
    Unsorted,
    /// More bounds than there are tags above the first.
    TooManyBands,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::NonFinite => write!(f, "breakpoint bound is not finite"),
            TableError::NonPositive => write!(f, "breakpoint bound is not positive"),
            TableError::Unsorted => write!(f, "breakpoint bounds are not strictly ascending"),
            TableError::TooManyBands => write!(
                f,
                "at most {} bounds are supported",
                Breakpoint::all().len() - 1
            ),
        }
    }
}

impl Error for TableError {}

/// Width breakpoints in pixels.
///
/// Bands are half-open `[lo, hi)`: a width exactly on a bound belongs to the
/// next (larger) breakpoint. The last band is unbounded above.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakpointTable {
    bands: Vec<(Range<f64>, Breakpoint)>,
    top: (RangeFrom<f64>, Breakpoint),
}

impl BreakpointTable {
    /// The four-tier default: `[0,400)` xs, `[400,768)` sm, `[768,979)` md,
    /// `[979,..)` lg.
    pub fn bootstrap() -> Self {
        Self::with_bounds(&[400.0, 768.0, 979.0]).unwrap()
    }

    /// The five-tier variant, adding `[979,1366)` lg and `[1366,..)` xl.
    pub fn five_tier() -> Self {
        Self::with_bounds(&[400.0, 768.0, 979.0, 1366.0]).unwrap()
    }

    /// Build a table from strictly ascending, finite, positive upper bounds.
    ///
    /// Tags are assigned in order starting at [`Breakpoint::Xs`]; the tag
    /// after the last bound covers the unbounded top band. An empty slice
    /// yields a degenerate single-band table.
    pub fn with_bounds(bounds: &[f64]) -> Result<Self, TableError> {
        if bounds.len() >= Breakpoint::all().len() {
            return Err(TableError::TooManyBands);
        }
        let mut lo = 0.0;
        let mut bands = Vec::with_capacity(bounds.len());
        for (i, &hi) in bounds.iter().enumerate() {
            if !hi.is_finite() {
                return Err(TableError::NonFinite);
            }
            if hi <= 0.0 {
                return Err(TableError::NonPositive);
            }
            if hi <= lo {
                return Err(TableError::Unsorted);
            }
            bands.push((lo..hi, Breakpoint::all()[i]));
            lo = hi;
        }
        let top = (lo.., Breakpoint::all()[bounds.len()]);
        Ok(Self { bands, top })
    }

    /// Classify a window width into its breakpoint.
    ///
    /// Total over all `f64` inputs: negative and NaN widths clamp to `0.0`,
    /// and `+inf` lands in the top band.
    pub fn classify(&self, width: f64) -> Breakpoint {
        let width = if width.is_nan() { 0.0 } else { width.max(0.0) };
        for (band, tag) in &self.bands {
            if band.contains(&width) {
                return *tag;
            }
        }
        self.top.1
    }

    /// Every tag this table can yield, narrowest first.
    pub fn tags(&self) -> impl Iterator<Item = Breakpoint> + '_ {
        self.bands
            .iter()
            .map(|(_, tag)| *tag)
            .chain(std::iter::once(self.top.1))
    }

    /// Number of bands, including the unbounded top band.
    pub fn tiers(&self) -> usize {
        self.bands.len() + 1
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::bootstrap()
    }
}
