use serde::{Deserialize, Serialize};

use crate::error::{ScanError, ScanResult};

/// One per-frequency measurement taken during a sweep step.
///
/// Lives for one sweep iteration unless promoted into the loot table. The
/// tone code is carried through opaquely for the decoder that sits outside
/// this core.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Sample {
    pub frequency: u32,
    pub rssi: u16,
    pub noise: u16,
    pub open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone_code: Option<u16>,
    pub blacklist: bool,
    pub known_good: bool,
}

impl Sample {
    pub fn at(frequency: u32) -> Self {
        Self {
            frequency,
            ..Self::default()
        }
    }
}

/// Ordered frequency span in Hz. `start <= end` always; a zero-width range
/// is legal but degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRange {
    pub start: u32,
    pub end: u32,
}

impl FrequencyRange {
    /// Builds a range from two bounds in either order.
    pub fn ordered(a: u32, b: u32) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn new(start: u32, end: u32) -> ScanResult<Self> {
        if start > end {
            return Err(ScanError::InvalidConfig(format!(
                "range start {} above end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn span(&self) -> u32 {
        self.end - self.start
    }

    pub fn contains(&self, frequency: u32) -> bool {
        frequency >= self.start && frequency <= self.end
    }

    /// Number of sweep steps covering the range, range end inclusive.
    /// A degenerate range is a single-step sweep.
    pub fn steps(&self, step_hz: u32) -> u32 {
        self.span() / step_hz + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_swaps_reversed_bounds() {
        let range = FrequencyRange::ordered(148_000_000, 144_000_000);
        assert_eq!(range.start, 144_000_000);
        assert_eq!(range.end, 148_000_000);
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        assert!(FrequencyRange::new(2, 1).is_err());
    }

    #[test]
    fn steps_include_the_range_end() {
        let range = FrequencyRange::new(144_000_000, 148_000_000).unwrap();
        assert_eq!(range.steps(2_500), 1_601);
    }

    #[test]
    fn degenerate_range_is_a_single_step() {
        let range = FrequencyRange::new(433_075_000, 433_075_000).unwrap();
        assert_eq!(range.steps(12_500), 1);
        assert!(range.contains(433_075_000));
    }
}
