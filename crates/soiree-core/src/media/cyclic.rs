//! Cyclic index over a fixed-length sequence.
//!
//! Every operation is a no-op on an empty sequence and never divides by
//! zero. Mutating calls return `true` when the index actually moved so the
//! owner can decide whether to publish a change.

/// Current position in a sequence that wraps from last to first and back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CyclicIndex {
    index: usize,
    length: usize,
}

impl CyclicIndex {
    pub fn new(length: usize) -> Self {
        Self { index: 0, length }
    }

    /// Start at `index` (clamped into range)
    pub fn starting_at(length: usize, index: usize) -> Self {
        let mut cyclic = Self::new(length);
        cyclic.goto(index);
        cyclic
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Current index, `None` for an empty sequence
    pub fn current(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.index)
    }

    /// Whether entry `k` is the current one (exactly one matches when non-empty)
    pub fn is_current(&self, k: usize) -> bool {
        !self.is_empty() && self.index == k
    }

    pub fn next(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let before = self.index;
        self.index = (self.index + 1) % self.length;
        self.index != before
    }

    pub fn previous(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let before = self.index;
        self.index = (self.index + self.length - 1) % self.length;
        self.index != before
    }

    /// Jump to `i`; out-of-range targets clamp to the last entry
    pub fn goto(&mut self, i: usize) -> bool {
        if self.is_empty() {
            return false;
        }
        let before = self.index;
        self.index = i.min(self.length - 1);
        self.index != before
    }

    /// Replace the sequence length, clamping the index into the new range
    pub fn set_length(&mut self, n: usize) -> bool {
        let before = self.index;
        self.length = n;
        if self.index >= n {
            self.index = n.saturating_sub(1);
        }
        self.index != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_sequence_wraps() {
        let mut cyclic = CyclicIndex::new(3);
        let mut seen = Vec::new();
        for _ in 0..3 {
            cyclic.next();
            seen.push(cyclic.index());
        }
        assert_eq!(seen, vec![1, 2, 0]);
    }

    #[test]
    fn test_cyclic_closure() {
        for length in 1..=7 {
            for start in 0..length {
                let mut cyclic = CyclicIndex::starting_at(length, start);
                for _ in 0..length {
                    cyclic.next();
                }
                assert_eq!(cyclic.index(), start, "length {} start {}", length, start);
            }
        }
    }

    #[test]
    fn test_previous_inverts_next() {
        for length in 1..=7 {
            for start in 0..length {
                let mut cyclic = CyclicIndex::starting_at(length, start);
                cyclic.next();
                cyclic.previous();
                assert_eq!(cyclic.index(), start);
            }
        }
    }

    #[test]
    fn test_previous_from_zero_wraps_to_last() {
        let mut cyclic = CyclicIndex::new(4);
        assert!(cyclic.previous());
        assert_eq!(cyclic.index(), 3);
    }

    #[test]
    fn test_empty_is_noop() {
        let mut cyclic = CyclicIndex::new(0);
        assert!(!cyclic.next());
        assert!(!cyclic.previous());
        assert!(!cyclic.goto(3));
        assert_eq!(cyclic.current(), None);
        assert!(!cyclic.is_current(0));
    }

    #[test]
    fn test_goto_out_of_range_clamps() {
        let mut cyclic = CyclicIndex::new(5);
        cyclic.goto(2);
        assert_eq!(cyclic.index(), 2);
        assert!(cyclic.goto(99));
        assert_eq!(cyclic.index(), 4);
        assert!(!cyclic.goto(usize::MAX));
        assert_eq!(cyclic.index(), 4);
    }

    #[test]
    fn test_set_length_clamps_index() {
        let mut cyclic = CyclicIndex::starting_at(6, 5);
        assert!(cyclic.set_length(2));
        assert_eq!(cyclic.index(), 1);

        assert!(!cyclic.set_length(10));
        assert_eq!(cyclic.index(), 1);

        cyclic.set_length(0);
        assert_eq!(cyclic.index(), 0);
        assert!(cyclic.is_empty());
    }

    #[test]
    fn test_single_item_never_moves() {
        let mut cyclic = CyclicIndex::new(1);
        assert!(!cyclic.next());
        assert!(!cyclic.previous());
        assert_eq!(cyclic.index(), 0);
    }

    #[test]
    fn test_exactly_one_current() {
        let cyclic = CyclicIndex::starting_at(5, 3);
        let highlighted: Vec<_> = (0..5).filter(|k| cyclic.is_current(*k)).collect();
        assert_eq!(highlighted, vec![3]);
    }
}
