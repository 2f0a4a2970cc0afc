//! Character membership sets for the `Set` expression.

use smallvec::SmallVec;

/// A set of code points, stored as inclusive ranges.
///
/// Built either from an explicit enumeration (`set("+-*/")`) or from a
/// single inclusive range (`range('0', '9')`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    ranges: SmallVec<[(char, char); 8]>,
}

impl CharSet {
    /// Set containing exactly the characters of `chars`.
    #[must_use]
    pub fn from_chars(chars: &str) -> Self {
        Self {
            ranges: chars.chars().map(|c| (c, c)).collect(),
        }
    }

    /// Inclusive range `lo..=hi`.
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`.
    #[must_use]
    pub fn range(lo: char, hi: char) -> Self {
        assert!(lo <= hi, "invalid character range {lo:?}..={hi:?}");
        let mut ranges = SmallVec::new();
        ranges.push((lo, hi));
        Self { ranges }
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi)
    }
}
