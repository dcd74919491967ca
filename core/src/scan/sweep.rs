use std::time::Duration;

use crate::error::{ScanError, ScanResult};
use crate::radio_interface::{FrequencyRange, Tuner, HIGH_BAND_EDGE_HZ};
use crate::telemetry::LogManager;

/// Drives the frequency cursor across the active range.
///
/// Owns band-selection state so the front-end filter is only reprogrammed
/// when the cursor crosses the 24 MHz band edge.
pub struct SweepController {
    range: FrequencyRange,
    step_hz: u32,
    frequency: u32,
    high_band: Option<bool>,
    logger: LogManager,
}

impl SweepController {
    pub fn new(range: FrequencyRange, step_hz: u32) -> ScanResult<Self> {
        if step_hz == 0 {
            return Err(ScanError::InvalidConfig("step size must be non-zero".into()));
        }
        Ok(Self {
            range,
            step_hz,
            frequency: range.start,
            high_band: None,
            logger: LogManager::new("sweep"),
        })
    }

    /// Swaps in a new active range (zoom push/pop) and rewinds to its start.
    pub fn retarget(&mut self, range: FrequencyRange) {
        self.logger.record(&format!(
            "sweep retarget {}..{} Hz",
            range.start, range.end
        ));
        self.range = range;
        self.frequency = range.start;
    }

    pub fn current_frequency(&self) -> u32 {
        self.frequency
    }

    pub fn range(&self) -> FrequencyRange {
        self.range
    }

    pub fn step_hz(&self) -> u32 {
        self.step_hz
    }

    /// Steps in the pass, range end inclusive.
    pub fn steps(&self) -> u32 {
        self.range.steps(self.step_hz)
    }

    /// Commands the hardware to the current frequency and waits for the
    /// synthesizer to settle. `hard` requests the slower full calibration.
    pub fn tune<T: Tuner>(&mut self, tuner: &mut T, settle: Duration, hard: bool) {
        let high_band = self.frequency >= HIGH_BAND_EDGE_HZ;
        if self.high_band != Some(high_band) {
            self.high_band = Some(high_band);
            tuner.select_filter(high_band);
        }
        tuner.tune_to(self.frequency, hard);
        tuner.settle(settle);
    }

    /// Advances by one step. Returns true on wraparound to the range start,
    /// which is the caller's cue to close out the pass.
    pub fn advance(&mut self) -> bool {
        self.frequency += self.step_hz;
        if self.frequency > self.range.end {
            self.frequency = self.range.start;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingTuner {
        tunes: Vec<(u32, bool)>,
        filter_selects: Vec<bool>,
    }

    impl Tuner for RecordingTuner {
        fn tune_to(&mut self, frequency_hz: u32, hard: bool) {
            self.tunes.push((frequency_hz, hard));
        }
        fn select_filter(&mut self, high_band: bool) {
            self.filter_selects.push(high_band);
        }
        fn read_rssi(&mut self) -> u16 {
            0
        }
        fn read_noise(&mut self) -> u16 {
            0
        }
        fn start_audio(&mut self) {}
        fn end_audio(&mut self) {}
        fn settle(&mut self, _duration: Duration) {}
    }

    #[test]
    fn rejects_zero_step() {
        let range = FrequencyRange::new(144_000_000, 148_000_000).unwrap();
        assert!(SweepController::new(range, 0).is_err());
    }

    #[test]
    fn wraps_to_start_after_full_pass() {
        let range = FrequencyRange::new(144_000_000, 148_000_000).unwrap();
        let mut sweep = SweepController::new(range, 2_500).unwrap();
        let steps = sweep.steps();
        assert_eq!(steps, 1_601);
        let mut wraps = 0;
        for _ in 0..steps {
            assert!(sweep.current_frequency() <= range.end);
            if sweep.advance() {
                wraps += 1;
            }
        }
        assert_eq!(wraps, 1);
        assert_eq!(sweep.current_frequency(), range.start);
    }

    #[test]
    fn degenerate_range_sweeps_a_single_frequency() {
        let range = FrequencyRange::new(446_006_250, 446_006_250).unwrap();
        let mut sweep = SweepController::new(range, 6_250).unwrap();
        assert_eq!(sweep.steps(), 1);
        assert!(sweep.advance());
        assert_eq!(sweep.current_frequency(), 446_006_250);
    }

    #[test]
    fn filter_selected_only_on_band_change() {
        let range = FrequencyRange::new(23_990_000, 24_010_000).unwrap();
        let mut sweep = SweepController::new(range, 10_000).unwrap();
        let mut tuner = RecordingTuner::default();
        for _ in 0..sweep.steps() {
            sweep.tune(&mut tuner, Duration::from_millis(1), true);
            sweep.advance();
        }
        // Low band once at the start, high band once at the 24 MHz edge.
        assert_eq!(tuner.filter_selects, vec![false, true]);
        assert_eq!(tuner.tunes.len(), 3);
    }

    #[test]
    fn retarget_rewinds_to_new_start() {
        let range = FrequencyRange::new(144_000_000, 148_000_000).unwrap();
        let mut sweep = SweepController::new(range, 2_500).unwrap();
        sweep.advance();
        let zoomed = FrequencyRange::new(145_000_000, 145_500_000).unwrap();
        sweep.retarget(zoomed);
        assert_eq!(sweep.current_frequency(), 145_000_000);
        assert_eq!(sweep.range(), zoomed);
    }
}
