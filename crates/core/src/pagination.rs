//! Inclusive zero-based pagination ranges.
//!
//! Every list operation accepts a `[from, to]` pair that maps onto the
//! backend's `Range` request header.

/// An inclusive zero-based row range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub from: i64,
    pub to: i64,
}

impl PageRange {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// First page of `size` rows.
    pub fn first(size: i64) -> Self {
        Self::new(0, size - 1)
    }

    /// Maximum number of rows the range can hold.
    pub fn len(&self) -> i64 {
        (self.to - self.from + 1).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The page directly after this one, with the same size.
    pub fn next(&self) -> Self {
        let size = self.len();
        Self::new(self.to + 1, self.to + size)
    }
}
