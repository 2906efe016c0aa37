//! Immutable source text consumed by the window.
//!
//! The window never owns the text; it copies ranges out of it on demand.
//! Encoding detection and newline normalization happen upstream, so a
//! [`SourceText`] is simply a sequence of UTF-16 code units.

use weft_cache::CodeUnit;

/// Read-only sequence of code units with a range-copy operation.
///
/// Implementations must be cheap to copy from at arbitrary offsets: the
/// window calls [`copy_to`](Self::copy_to) whenever it slides, grows, or
/// jumps to a position outside its loaded range.
pub trait SourceText {
    /// Total number of code units.
    fn len(&self) -> usize;

    /// Copy `dest.len()` code units starting at `source_start` into `dest`.
    ///
    /// # Contract
    ///
    /// `source_start + dest.len() <= self.len()`. The window only requests
    /// in-bounds ranges.
    fn copy_to(&self, source_start: usize, dest: &mut [CodeUnit]);

    /// Returns `true` if the text has no code units.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SourceText for [CodeUnit] {
    fn len(&self) -> usize {
        <[CodeUnit]>::len(self)
    }

    fn copy_to(&self, source_start: usize, dest: &mut [CodeUnit]) {
        dest.copy_from_slice(&self[source_start..source_start + dest.len()]);
    }
}

/// Source text stored as UTF-16 code units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utf16Source {
    units: Box<[CodeUnit]>,
}

impl Utf16Source {
    /// Encode `source` as UTF-16.
    pub fn new(source: &str) -> Self {
        Utf16Source {
            units: source.encode_utf16().collect(),
        }
    }

    /// Wrap code units that are already UTF-16 (possibly ill-formed).
    pub fn from_units(units: impl Into<Box<[CodeUnit]>>) -> Self {
        Utf16Source {
            units: units.into(),
        }
    }

    /// The underlying code units.
    pub fn as_units(&self) -> &[CodeUnit] {
        &self.units
    }
}

impl SourceText for Utf16Source {
    fn len(&self) -> usize {
        self.units.len()
    }

    fn copy_to(&self, source_start: usize, dest: &mut [CodeUnit]) {
        self.units.copy_to(source_start, dest);
    }
}

impl From<&str> for Utf16Source {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

#[cfg(test)]
mod tests;
