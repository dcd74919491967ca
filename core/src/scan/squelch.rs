use crate::radio_interface::Sample;

/// Explicit sweep/listen state, replacing scattered boolean flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Scanning,
    Listening,
}

/// State-machine edge produced by one squelch evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Opened,
    Closed,
}

/// Adaptive open thresholds, recomputed once per full sweep pass.
///
/// The defaults keep squelch firmly shut until the first pass has produced
/// real statistics: an unreachable RSSI floor and a zero noise ceiling.
#[derive(Debug, Clone, Copy)]
pub struct SquelchThresholds {
    pub rssi_floor: u16,
    pub noise_ceiling: u16,
}

impl Default for SquelchThresholds {
    fn default() -> Self {
        Self {
            rssi_floor: u16::MAX,
            noise_ceiling: 0,
        }
    }
}

impl SquelchThresholds {
    /// Derives thresholds from one pass's statistics: the RSSI floor is the
    /// pass's noise-floor estimate, the noise ceiling sits `margin` below
    /// the worst noise reading.
    pub fn update(&mut self, noise_floor: u16, noise_max: u16, margin: u16) {
        self.rssi_floor = noise_floor;
        self.noise_ceiling = noise_max.saturating_sub(margin);
    }
}

/// Hysteresis-based open/closed decision over per-step samples.
pub struct SquelchDetector {
    thresholds: SquelchThresholds,
    state: ScanState,
    caught: Option<Sample>,
}

impl SquelchDetector {
    pub fn new() -> Self {
        Self {
            thresholds: SquelchThresholds::default(),
            state: ScanState::Scanning,
            caught: None,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn thresholds(&self) -> SquelchThresholds {
        self.thresholds
    }

    pub fn caught(&self) -> Option<Sample> {
        self.caught
    }

    pub fn update_thresholds(&mut self, noise_floor: u16, noise_max: u16, margin: u16) {
        self.thresholds.update(noise_floor, noise_max, margin);
    }

    /// Sets the sample's open flag against the current thresholds. While
    /// listening the noise ceiling is relaxed by `margin` so a reading
    /// marginally past the original ceiling does not flap the squelch shut.
    pub fn measure(&self, sample: &mut Sample, margin: u16) {
        let relax = match self.state {
            ScanState::Listening => margin,
            ScanState::Scanning => 0,
        };
        sample.open = sample.rssi >= self.thresholds.rssi_floor
            && sample.noise <= self.thresholds.noise_ceiling.saturating_add(relax);
    }

    /// Applies the (possibly loot-suppressed) open flag to the state machine.
    pub fn transition(&mut self, sample: &Sample) -> Transition {
        match (self.state, sample.open) {
            (ScanState::Scanning, true) => {
                self.state = ScanState::Listening;
                self.caught = Some(*sample);
                Transition::Opened
            }
            (ScanState::Listening, false) => {
                self.state = ScanState::Scanning;
                self.caught = None;
                Transition::Closed
            }
            _ => Transition::None,
        }
    }

    /// Forces the detector back to scanning, clearing any caught frequency.
    /// Thresholds survive; they belong to the pass statistics, not to the
    /// listen state.
    pub fn reset_state(&mut self) {
        self.state = ScanState::Scanning;
        self.caught = None;
    }
}

impl Default for SquelchDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rssi: u16, noise: u16) -> Sample {
        Sample {
            frequency: 446_000_000,
            rssi,
            noise,
            ..Sample::default()
        }
    }

    fn armed_detector() -> SquelchDetector {
        let mut detector = SquelchDetector::new();
        // noise_floor 60, noise_max 80, margin 14 -> floor 60, ceiling 66.
        detector.update_thresholds(60, 80, 14);
        detector
    }

    #[test]
    fn defaults_keep_squelch_closed_before_first_pass() {
        let detector = SquelchDetector::new();
        let mut strong = sample(u16::MAX - 1, 0);
        detector.measure(&mut strong, 14);
        assert!(!strong.open);
    }

    #[test]
    fn opens_on_rssi_above_floor_and_noise_below_ceiling() {
        let mut detector = armed_detector();
        let mut hit = sample(100, 50);
        detector.measure(&mut hit, 14);
        assert!(hit.open);
        assert_eq!(detector.transition(&hit), Transition::Opened);
        assert_eq!(detector.state(), ScanState::Listening);
        assert_eq!(detector.caught().unwrap().frequency, 446_000_000);
    }

    #[test]
    fn hysteresis_holds_open_within_relaxed_ceiling() {
        let mut detector = armed_detector();
        let mut hit = sample(100, 50);
        detector.measure(&mut hit, 14);
        detector.transition(&hit);

        // Noise 70 is above the original ceiling (66) but inside the
        // relaxed one (66 + 14): stays open.
        let mut marginal = sample(100, 70);
        detector.measure(&mut marginal, 14);
        assert!(marginal.open);
        assert_eq!(detector.transition(&marginal), Transition::None);

        // Noise clearly above both ceilings closes exactly once.
        let mut noisy = sample(100, 95);
        detector.measure(&mut noisy, 14);
        assert!(!noisy.open);
        assert_eq!(detector.transition(&noisy), Transition::Closed);
        assert_eq!(detector.transition(&noisy), Transition::None);
        assert!(detector.caught().is_none());
    }

    #[test]
    fn marginal_noise_does_not_open_from_scanning() {
        let mut detector = armed_detector();
        let mut marginal = sample(100, 70);
        detector.measure(&mut marginal, 14);
        assert!(!marginal.open);
        assert_eq!(detector.transition(&marginal), Transition::None);
    }

    #[test]
    fn reset_state_clears_listen_but_not_thresholds() {
        let mut detector = armed_detector();
        let mut hit = sample(100, 50);
        detector.measure(&mut hit, 14);
        detector.transition(&hit);
        detector.reset_state();
        assert_eq!(detector.state(), ScanState::Scanning);
        assert_eq!(detector.thresholds().rssi_floor, 60);
    }
}
