use crate::radio_interface::display::{DisplaySink, COLOR_BACKGROUND};
use crate::render::gradient::GradientMapper;
use crate::scan::SpectrumHistory;

/// Rows of scroll history kept on screen.
pub const WF_ROWS: usize = 61;
/// Bytes per row: two 4-bit palette indices per byte across 160 columns.
pub const WF_ROW_BYTES: usize = 80;

/// Scrolling 2D history of palette-mapped intensities.
///
/// Row 0 is always the most recent pass. The nibble packing halves the
/// memory footprint and is kept behind the index accessor pair.
pub struct WaterfallBuffer {
    rows: [[u8; WF_ROW_BYTES]; WF_ROWS],
}

impl WaterfallBuffer {
    pub fn new() -> Self {
        Self {
            rows: [[0; WF_ROW_BYTES]; WF_ROWS],
        }
    }

    pub fn clear(&mut self) {
        self.rows = [[0; WF_ROW_BYTES]; WF_ROWS];
    }

    /// Palette index stored at (row, column).
    pub fn index_at(&self, row: usize, column: usize) -> u8 {
        let byte = self.rows[row][column / 2];
        if column % 2 == 0 {
            byte & 0x0f
        } else {
            (byte >> 4) & 0x0f
        }
    }

    /// Stores a 4-bit palette index at (row, column).
    pub fn set_index(&mut self, row: usize, column: usize, index: u8) {
        let slot = &mut self.rows[row][column / 2];
        if column % 2 == 0 {
            *slot = (*slot & 0xf0) | (index & 0x0f);
        } else {
            *slot = (*slot & 0x0f) | ((index & 0x0f) << 4);
        }
    }

    /// Scrolls history down one row and fills row 0 from the pass's column
    /// peaks. Called once per completed sweep pass.
    pub fn push_row(&mut self, history: &SpectrumHistory, mapper: &GradientMapper) {
        for row in (1..WF_ROWS).rev() {
            self.rows[row] = self.rows[row - 1];
        }
        self.rows[0] = [0; WF_ROW_BYTES];
        for (column, &rssi) in history.peaks().iter().enumerate() {
            self.set_index(0, column, mapper.waterfall_index(rssi));
        }
    }

    /// Emits the buffer bottom-to-top, row 0 landing at `top_offset` (the
    /// band reserved for status text). Rows pushed past the bottom of the
    /// waterfall band are dropped.
    pub fn render<D: DisplaySink>(&self, sink: &mut D, top_offset: u8) {
        let visible = WF_ROWS - top_offset as usize;
        for row in (0..visible).rev() {
            let y = top_offset + row as u8;
            for column in 0..WF_ROW_BYTES * 2 {
                let nibble = self.index_at(row, column);
                let color = if nibble == 0 {
                    COLOR_BACKGROUND
                } else {
                    GradientMapper::waterfall_color(nibble)
                };
                sink.fill_rect(column as u8, y, 1, 1, color);
            }
        }
    }
}

impl Default for WaterfallBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio_interface::Sample;

    fn filled_history(rssi: u16, columns: u32) -> SpectrumHistory {
        let mut history = SpectrumHistory::new();
        history.init(columns, columns as usize).unwrap();
        for _ in 0..columns {
            history.add_sample(&Sample {
                frequency: 145_000_000,
                rssi,
                noise: 40,
                ..Sample::default()
            });
            history.next();
        }
        history
    }

    #[test]
    fn nibble_accessors_round_trip_both_halves() {
        let mut buffer = WaterfallBuffer::new();
        buffer.set_index(0, 10, 0x9);
        buffer.set_index(0, 11, 0x4);
        assert_eq!(buffer.index_at(0, 10), 0x9);
        assert_eq!(buffer.index_at(0, 11), 0x4);
        // Both land in byte 5, low and high nibble.
        buffer.set_index(0, 10, 0x1);
        assert_eq!(buffer.index_at(0, 11), 0x4);
    }

    #[test]
    fn push_row_scrolls_older_rows_down() {
        let mut buffer = WaterfallBuffer::new();
        let mut mapper = GradientMapper::new();
        mapper.update_window(40, 140, 40);

        let strong = filled_history(140, 160);
        buffer.push_row(&strong, &mapper);
        let strong_index = buffer.index_at(0, 0);
        assert!(strong_index > 0);

        let weak = filled_history(40, 160);
        buffer.push_row(&weak, &mapper);
        assert_eq!(buffer.index_at(1, 0), strong_index);
        assert!(buffer.index_at(0, 0) < strong_index);
    }

    #[test]
    fn oldest_row_falls_off_the_bottom() {
        let mut buffer = WaterfallBuffer::new();
        let mut mapper = GradientMapper::new();
        mapper.update_window(40, 140, 40);
        buffer.set_index(WF_ROWS - 1, 3, 0xf);
        buffer.push_row(&filled_history(40, 160), &mapper);
        assert_ne!(buffer.index_at(WF_ROWS - 1, 3), 0xf);
    }

    #[derive(Default)]
    struct CapturingSink {
        rects: Vec<(u8, u8, u16)>,
    }

    impl DisplaySink for CapturingSink {
        fn fill_rect(&mut self, x: u8, y: u8, _w: u8, _h: u8, color: u16) {
            self.rects.push((x, y, color));
        }
        fn draw_small_string(&mut self, _x: u8, _y: u8, _text: &str, _color: u16) {}
    }

    #[test]
    fn newest_row_lands_at_the_top_offset() {
        let mut buffer = WaterfallBuffer::new();
        let mut mapper = GradientMapper::new();
        mapper.update_window(40, 140, 40);
        buffer.push_row(&filled_history(140, 160), &mapper);

        for offset in [0u8, 11] {
            let mut sink = CapturingSink::default();
            buffer.render(&mut sink, offset);
            // Row 0 is drawn lit exactly at the offset, and nothing above it.
            assert!(sink
                .rects
                .iter()
                .any(|&(_, y, color)| y == offset && color != COLOR_BACKGROUND));
            assert!(sink.rects.iter().all(|&(_, y, _)| y >= offset));
            // Overflowing rows are dropped, never pushed past the band.
            assert!(sink.rects.iter().all(|&(_, y, _)| (y as usize) < WF_ROWS));
        }
    }

    #[test]
    fn short_pass_leaves_tail_columns_dark() {
        let mut buffer = WaterfallBuffer::new();
        let mut mapper = GradientMapper::new();
        mapper.update_window(40, 140, 40);
        buffer.push_row(&filled_history(140, 80), &mapper);
        assert!(buffer.index_at(0, 40) > 0);
        assert_eq!(buffer.index_at(0, 100), 0);
    }
}
