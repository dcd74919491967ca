//! Integer statistics over raw RSSI/noise readings.
//!
//! Empty slices yield 0 everywhere: stale statistics are a policy case, not
//! an error, so callers never have to guard a first-pass division by zero.

pub struct StatsHelper;

impl StatsHelper {
    pub fn min(values: &[u16]) -> u16 {
        values.iter().copied().min().unwrap_or(0)
    }

    pub fn max(values: &[u16]) -> u16 {
        values.iter().copied().max().unwrap_or(0)
    }

    pub fn mean(values: &[u16]) -> u16 {
        if values.is_empty() {
            return 0;
        }
        let sum: u32 = values.iter().map(|&v| v as u32).sum();
        (sum / values.len() as u32) as u16
    }

    /// Noise-floor estimator: root of the mean of squares.
    pub fn rms(values: &[u16]) -> u16 {
        if values.is_empty() {
            return 0;
        }
        let sum_sq: u64 = values.iter().map(|&v| v as u64 * v as u64).sum();
        Self::isqrt(sum_sq / values.len() as u64)
    }

    /// Integer square root by bit-wise refinement.
    pub fn isqrt(value: u64) -> u16 {
        let mut result: u64 = 0;
        let mut bit: u64 = 1 << 62;
        let mut remainder = value;
        while bit > value {
            bit >>= 2;
        }
        while bit != 0 {
            if remainder >= result + bit {
                remainder -= result + bit;
                result = (result >> 1) + bit;
            } else {
                result >>= 1;
            }
            bit >>= 2;
        }
        result.min(u16::MAX as u64) as u16
    }
}
