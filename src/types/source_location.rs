//! Byte ranges into the markup being parsed.

use alloc::sync::Arc;

use crate::types::ErrorLocationProvider;

/// Location of a token or node in the input string.
///
/// The input is shared between every location produced by one parse, so a
/// location can always render the surrounding excerpt of the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// The full input string
    pub input: Arc<str>,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl SourceLocation {
    /// Creates a location over a shared input.
    #[must_use]
    pub const fn new(input: Arc<str>, start: usize, end: usize) -> Self {
        Self { input, start, end }
    }

    /// Start byte offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End byte offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The input this location points into.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Merges two locations into the range spanning from the first to the
    /// second. Locations from different inputs do not merge.
    #[must_use]
    pub fn range(first: Option<&Self>, second: Option<&Self>) -> Option<Self> {
        match (first, second) {
            (Some(fp), None) => Some(fp.clone()),
            (None, Some(sp)) => Some(sp.clone()),
            (Some(fp), Some(sp)) => Arc::ptr_eq(&fp.input, &sp.input).then(|| Self {
                input: Arc::clone(&fp.input),
                start: fp.start,
                end: sp.end,
            }),
            (None, None) => None,
        }
    }
}

impl ErrorLocationProvider for SourceLocation {
    fn loc(&self) -> Option<&SourceLocation> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_spans_both_locations() {
        let input: Arc<str> = Arc::from(r"x^2 + \frac{1}{2}");
        let first = SourceLocation::new(Arc::clone(&input), 0, 1);
        let second = SourceLocation::new(Arc::clone(&input), 6, 11);

        let merged = SourceLocation::range(Some(&first), Some(&second)).unwrap();
        assert_eq!(merged.start(), 0);
        assert_eq!(merged.end(), 11);
        assert_eq!(&merged.input()[merged.start..merged.end], r"x^2 + \frac");
    }

    #[test]
    fn test_range_rejects_foreign_input() {
        let a = SourceLocation::new(Arc::from("abc"), 0, 1);
        let b = SourceLocation::new(Arc::from("abc"), 1, 2);
        assert!(SourceLocation::range(Some(&a), Some(&b)).is_none());
        assert_eq!(SourceLocation::range(None, Some(&b)), Some(b));
        assert!(SourceLocation::range(None, None).is_none());
    }
}
