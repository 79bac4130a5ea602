/// A byte range `[start, end)` into the source.
///
/// Nodes keep spans alongside their decoded content so that the exact
/// source of any construct can be recovered by slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Shifts both ends by `base`.
    #[must_use]
    pub fn offset(self, base: usize) -> Self {
        Self {
            start: self.start + base,
            end: self.end + base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_span_is_empty() {
        let sp = Span::new(7, 3);
        assert_eq!(sp.len(), 0);
        assert!(sp.is_empty());
    }

    #[test]
    fn offset_shifts_both_ends() {
        assert_eq!(Span::new(2, 5).offset(10), Span::new(12, 15));
    }
}
