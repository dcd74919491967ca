use crate::math::convert_domain_u32;
use crate::radio_interface::FrequencyRange;

/// On-screen sub-range picker in pixel coordinates.
///
/// Invariant: `center - half_width >= 0` and `center + half_width <= width-1`
/// at all times. Moves and resizes that would break it are rejected and
/// reported as no-change instead of being clamped.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    width: u32,
    center: u32,
    half_width: u32,
}

impl Cursor {
    pub fn new(width: u32) -> Self {
        let mut cursor = Self {
            width,
            center: 0,
            half_width: 0,
        };
        cursor.reset();
        cursor
    }

    /// Restores the default span: centered, a quarter of the display wide on
    /// each side.
    pub fn reset(&mut self) {
        self.center = self.width / 2;
        self.half_width = self.width / 4;
    }

    pub fn center(&self) -> u32 {
        self.center
    }

    pub fn half_width(&self) -> u32 {
        self.half_width
    }

    /// Shifts the cursor one pixel right (`up == true`) or left. Returns
    /// false without moving when the span would leave the display.
    pub fn move_by(&mut self, up: bool) -> bool {
        if up {
            if self.center + self.half_width + 1 > self.width - 1 {
                return false;
            }
            self.center += 1;
        } else {
            if self.center < self.half_width + 1 {
                return false;
            }
            self.center -= 1;
        }
        true
    }

    /// Grows or shrinks the span by one pixel per side. Growing stops at the
    /// display edges, shrinking at a one-pixel half-width.
    pub fn resize(&mut self, grow: bool) -> bool {
        if grow {
            if self.center < self.half_width + 1
                || self.center + self.half_width + 1 > self.width - 1
            {
                return false;
            }
            self.half_width += 1;
        } else {
            if self.half_width <= 1 {
                return false;
            }
            self.half_width -= 1;
        }
        true
    }

    /// Converts the pixel span back to the frequency domain of the active
    /// range, both ends rounded to the nearest step multiple, ties up.
    pub fn frequency_range(&self, active: &FrequencyRange, step_hz: u32) -> FrequencyRange {
        FrequencyRange {
            start: self.pixel_to_frequency(self.center - self.half_width, active, step_hz),
            end: self.pixel_to_frequency(self.center + self.half_width, active, step_hz),
        }
    }

    pub fn center_frequency(&self, active: &FrequencyRange, step_hz: u32) -> u32 {
        self.pixel_to_frequency(self.center, active, step_hz)
    }

    fn pixel_to_frequency(&self, pixel: u32, active: &FrequencyRange, step_hz: u32) -> u32 {
        let raw = convert_domain_u32(pixel, 0, self.width - 1, active.start, active.end);
        (raw + step_hz / 2) / step_hz * step_hz
    }
}
