use crate::radio_interface::FrequencyRange;

/// Bound on nested zoom depth; overflow evicts the oldest range.
pub const ZOOM_CAPACITY: usize = 4;

/// Bounded stack of frequency ranges for progressive zoom navigation.
///
/// Non-empty from construction on: the root range can never be popped, so
/// `active()` is always defined. Callers must reinitialize the sweep after
/// any push or pop.
pub struct ZoomStack {
    ranges: Vec<FrequencyRange>,
}

impl ZoomStack {
    pub fn new(root: FrequencyRange) -> Self {
        let mut ranges = Vec::with_capacity(ZOOM_CAPACITY);
        ranges.push(root);
        Self { ranges }
    }

    pub fn active(&self) -> FrequencyRange {
        *self.ranges.last().expect("zoom stack is never empty")
    }

    pub fn depth(&self) -> usize {
        self.ranges.len()
    }

    /// Pushes a new active range. At capacity the oldest entry (index 0) is
    /// evicted; this never blocks and never fails.
    pub fn push(&mut self, range: FrequencyRange) {
        if self.ranges.len() >= ZOOM_CAPACITY {
            self.ranges.remove(0);
        }
        self.ranges.push(range);
    }

    /// Pops back to the previous range. A single-element stack is left
    /// untouched and the call reports no change.
    pub fn pop(&mut self) -> bool {
        if self.ranges.len() > 1 {
            self.ranges.pop();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> FrequencyRange {
        FrequencyRange::new(start, end).unwrap()
    }

    #[test]
    fn push_beyond_capacity_evicts_oldest() {
        let mut stack = ZoomStack::new(range(100, 200));
        for i in 1..=6u32 {
            stack.push(range(100 + i, 200 + i));
        }
        assert_eq!(stack.depth(), ZOOM_CAPACITY);
        assert_eq!(stack.active(), range(106, 206));
    }

    #[test]
    fn pop_on_root_is_a_no_op() {
        let mut stack = ZoomStack::new(range(100, 200));
        assert!(!stack.pop());
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.active(), range(100, 200));
    }

    #[test]
    fn pop_restores_previous_range() {
        let mut stack = ZoomStack::new(range(100, 200));
        stack.push(range(120, 180));
        assert!(stack.pop());
        assert_eq!(stack.active(), range(100, 200));
    }
}
