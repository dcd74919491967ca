use crate::error::{ScanError, ScanResult};
use crate::math::{ceil_div, StatsHelper};
use crate::radio_interface::Sample;

/// Display width the column buffers are sized for.
pub const MAX_POINTS: usize = 160;

/// Per-column aggregate of one sweep pass.
///
/// Maps steps onto display columns via `column = width * step / steps`, with
/// an expansion run of `ceil(width / steps)` columns when the sweep has fewer
/// steps than columns. A column is reset the moment the sweep first enters it
/// in a pass, so stale data from the previous pass disappears without a
/// whole-buffer clear.
pub struct SpectrumHistory {
    rssi: [u16; MAX_POINTS],
    noise: [u16; MAX_POINTS],
    markers: [bool; MAX_POINTS],
    needs_redraw: [bool; MAX_POINTS],
    width: usize,
    steps_count: u32,
    current_step: u32,
    ex_len: u32,
    filled_points: usize,
    entered_through: Option<usize>,
}

impl SpectrumHistory {
    pub fn new() -> Self {
        Self {
            rssi: [0; MAX_POINTS],
            noise: [u16::MAX; MAX_POINTS],
            markers: [false; MAX_POINTS],
            needs_redraw: [false; MAX_POINTS],
            width: MAX_POINTS,
            steps_count: 1,
            current_step: 0,
            ex_len: MAX_POINTS as u32,
            filled_points: 0,
            entered_through: None,
        }
    }

    /// Reconfigures for a new sweep: `steps` per pass across `width` columns.
    pub fn init(&mut self, steps: u32, width: usize) -> ScanResult<()> {
        if steps == 0 {
            return Err(ScanError::InvalidConfig("steps must be non-zero".into()));
        }
        if width == 0 || width > MAX_POINTS {
            return Err(ScanError::InvalidConfig(format!(
                "width {} outside 1..={}",
                width, MAX_POINTS
            )));
        }
        self.steps_count = steps;
        self.width = width;
        self.ex_len = ceil_div(width as u32, steps);
        self.reset();
        Ok(())
    }

    /// Clears all columns and rewinds to the start of a pass.
    pub fn reset(&mut self) {
        self.rssi = [0; MAX_POINTS];
        self.noise = [u16::MAX; MAX_POINTS];
        self.markers = [false; MAX_POINTS];
        self.needs_redraw = [false; MAX_POINTS];
        self.filled_points = 0;
        self.current_step = 0;
        self.entered_through = None;
    }

    /// Rewinds the step counter for the next pass. Columns are left in place
    /// and reset lazily as the new pass reaches them.
    pub fn begin(&mut self) {
        self.current_step = 0;
        self.entered_through = None;
    }

    /// Advances to the next step, capped at the final step of the pass.
    pub fn next(&mut self) {
        if self.current_step < self.steps_count - 1 {
            self.current_step += 1;
        }
    }

    /// Aggregates one measurement into the column(s) for the current step.
    pub fn add_sample(&mut self, sample: &Sample) {
        let base = (self.width as u32 * self.current_step / self.steps_count) as usize;
        let mut touched = base;
        for ex_index in 0..self.ex_len as usize {
            let x = base + ex_index;
            if x >= self.width {
                break;
            }
            let entering = self.entered_through.map_or(true, |through| x > through);
            if entering {
                // First contribution to this column this pass: reset before
                // aggregating, so stale data vanishes deterministically.
                self.rssi[x] = 0;
                self.noise[x] = u16::MAX;
                self.markers[x] = false;
                self.needs_redraw[x] = false;
                self.entered_through = Some(x);
            }
            if sample.rssi > self.rssi[x] {
                self.rssi[x] = sample.rssi;
                self.needs_redraw[x] = true;
            }
            if sample.noise < self.noise[x] {
                self.noise[x] = sample.noise;
                self.needs_redraw[x] = true;
            }
            if !self.markers[x] && sample.open {
                self.markers[x] = true;
            }
            touched = x;
        }
        if touched < self.width && touched + 1 > self.filled_points {
            self.filled_points = touched + 1;
        }
    }

    pub fn filled_points(&self) -> usize {
        self.filled_points
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn ex_len(&self) -> u32 {
        self.ex_len
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Peak RSSI per filled column.
    pub fn peaks(&self) -> &[u16] {
        &self.rssi[..self.filled_points]
    }

    pub fn column_rssi(&self, column: usize) -> Option<u16> {
        self.rssi.get(column).copied()
    }

    pub fn column_marker(&self, column: usize) -> Option<bool> {
        self.markers.get(column).copied()
    }

    pub fn needs_redraw(&self, column: usize) -> bool {
        self.needs_redraw.get(column).copied().unwrap_or(false)
    }

    /// Reads and clears a column's redraw flag.
    pub fn take_redraw(&mut self, column: usize) -> bool {
        if let Some(flag) = self.needs_redraw.get_mut(column) {
            std::mem::take(flag)
        } else {
            false
        }
    }

    pub fn mark_all_dirty(&mut self) {
        for flag in &mut self.needs_redraw[..self.width] {
            *flag = true;
        }
    }

    /// Noise-floor estimate for the pass: RMS of the collected RSSI peaks.
    pub fn noise_floor(&self) -> u16 {
        StatsHelper::rms(self.peaks())
    }

    pub fn noise_max(&self) -> u16 {
        StatsHelper::max(&self.noise[..self.filled_points])
    }

    pub fn rssi_min(&self) -> u16 {
        StatsHelper::min(self.peaks())
    }

    pub fn rssi_max(&self) -> u16 {
        StatsHelper::max(self.peaks())
    }
}

impl Default for SpectrumHistory {
    fn default() -> Self {
        Self::new()
    }
}
