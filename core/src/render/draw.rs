use crate::math::{clamp, convert_domain, convert_domain_u32};
use crate::radio_interface::display::{
    DisplaySink, COLOR_BACKGROUND, COLOR_FOREGROUND, COLOR_GREEN, COLOR_GREY, COLOR_GREY_DARK,
    COLOR_YELLOW,
};
use crate::radio_interface::FrequencyRange;
use crate::render::gradient::GradientMapper;
use crate::render::waterfall::WaterfallBuffer;
use crate::scan::cursor::Cursor;
use crate::scan::history::{SpectrumHistory, MAX_POINTS};

/// Vertical layout of the 160x128 panel: waterfall on top, separator, then
/// the bar graph hanging below it.
pub const SEPARATOR_Y: u8 = 61;
pub const GRAPH_TOP: u8 = 62;
pub const GRAPH_HEIGHT: u8 = 32;
pub const CURSOR_Y: u8 = 56;
pub const TEXT_Y: u8 = 2;
/// Waterfall rows hidden while the status line needs the top of the screen.
pub const STATUS_ROWS: u8 = 11;

/// Content of the status line above the waterfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLine {
    /// Tuning-delay and noise-margin values, shown briefly after adjustment.
    Adjust { delay_ms: u8, margin: u16 },
    /// Cursor bounds in Hz, shown briefly while the cursor moves.
    CursorBounds { start: u32, center: u32, end: u32 },
    /// Steady state: the caught frequency and, optionally, the range bounds.
    Idle {
        caught: Option<u32>,
        bounds: Option<FrequencyRange>,
    },
}

/// Fixed-point frequency formatting: MHz with 100 Hz resolution.
pub fn format_frequency(hz: u32) -> String {
    format!("{}.{:04}", hz / 1_000_000, (hz % 1_000_000) / 100)
}

/// Emits one frame's draw commands against the display contract.
///
/// Keeps per-column previous-height bookkeeping so a quieter column erases
/// only its stale top instead of repainting the whole graph band.
pub struct Renderer {
    old_heights: [u8; MAX_POINTS],
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            old_heights: [0; MAX_POINTS],
        }
    }

    /// Clears the screen and forgets previous bar heights.
    pub fn full_reset<D: DisplaySink>(&mut self, sink: &mut D) {
        self.old_heights = [0; MAX_POINTS];
        sink.fill_screen(COLOR_BACKGROUND);
    }

    /// Draws the bar graph for the current pass and refreshes the gradient
    /// window from the pass statistics. Only columns whose redraw flag is
    /// set are repainted; the flag is consumed here.
    pub fn render_spectrum<D: DisplaySink>(
        &mut self,
        sink: &mut D,
        history: &mut SpectrumHistory,
        mapper: &mut GradientMapper,
        range: &FrequencyRange,
    ) {
        let filled = history.filled_points();
        let width = history.width() as u8;
        if filled > 0 {
            mapper.update_window(history.rssi_min(), history.rssi_max(), history.noise_floor());
        }

        let v_min = history.rssi_min().saturating_sub(1) as i32;
        let spread = history.rssi_max().saturating_sub(history.noise_floor()) as i32;
        let v_max = history.rssi_max() as i32 + clamp(spread, 20, spread);

        let ex_len = history.ex_len() as usize;
        let mut column = 0;
        while column < filled {
            if !history.needs_redraw(column) {
                column += ex_len;
                continue;
            }
            let rssi = history.column_rssi(column).unwrap_or(0);
            let height =
                convert_domain(rssi as i32 * 2, v_min * 2, v_max * 2, 0, GRAPH_HEIGHT as i32)
                    as u8;
            let old = self.old_heights[column];
            if height < old {
                sink.fill_rect(
                    column as u8,
                    GRAPH_TOP + height,
                    ex_len as u8,
                    old - height,
                    COLOR_BACKGROUND,
                );
            }
            self.old_heights[column] = height;
            column += ex_len;
        }

        sink.draw_hline(0, SEPARATOR_Y, width, COLOR_GREY);
        self.render_ticks(sink, range, width);

        let mut column = 0;
        while column < filled {
            if !history.take_redraw(column) {
                column += ex_len;
                continue;
            }
            sink.fill_rect(
                column as u8,
                GRAPH_TOP,
                ex_len as u8,
                self.old_heights[column],
                COLOR_FOREGROUND,
            );
            if history.column_marker(column).unwrap_or(false) {
                sink.fill_rect(column as u8, SEPARATOR_Y, ex_len as u8, 1, COLOR_GREEN);
            }
            column += ex_len;
        }
    }

    /// Frequency tick marks at the first decade division finer than the
    /// span, with half-decade marks in a darker shade.
    fn render_ticks<D: DisplaySink>(&self, sink: &mut D, range: &FrequencyRange, width: u8) {
        let span = range.span();
        let mut division = 100_000_000u32;
        while division >= 10 {
            if span > division {
                self.draw_tick_row(sink, range, width, division, COLOR_GREY);
                self.draw_tick_row(sink, range, width, division / 2, COLOR_GREY_DARK);
                return;
            }
            division /= 10;
        }
    }

    fn draw_tick_row<D: DisplaySink>(
        &self,
        sink: &mut D,
        range: &FrequencyRange,
        width: u8,
        division: u32,
        color: u16,
    ) {
        let mut f = range.start - (range.start % division) + division;
        while f < range.end {
            let x = convert_domain_u32(f, range.start, range.end, 0, width as u32 - 1) as u8;
            sink.draw_vline(x, GRAPH_TOP, GRAPH_HEIGHT, color);
            f += division;
        }
    }

    /// Cursor span markers on their own row above the separator.
    pub fn render_cursor<D: DisplaySink>(&self, sink: &mut D, cursor: &Cursor, width: u8) {
        sink.fill_rect(0, CURSOR_Y, width, 4, COLOR_BACKGROUND);
        let left = (cursor.center() - cursor.half_width()) as u8;
        let right = (cursor.center() + cursor.half_width()) as u8;
        sink.draw_vline(left, CURSOR_Y, 4, COLOR_YELLOW);
        sink.draw_vline(right, CURSOR_Y, 4, COLOR_YELLOW);
        sink.draw_hline(left, CURSOR_Y + 2, right - left + 1, COLOR_YELLOW);
    }

    /// Small arrow under the waterfall pointing at a frequency of interest.
    pub fn render_arrow<D: DisplaySink>(&self, sink: &mut D, range: &FrequencyRange, f: u32, width: u8) {
        let x = convert_domain_u32(f, range.start, range.end, 0, width as u32 - 1) as u8;
        sink.draw_vline(x, CURSOR_Y, 4, COLOR_GREY);
        sink.fill_rect(x.saturating_sub(2), CURSOR_Y, 5, 2, COLOR_GREY);
    }

    /// Status text at the top of the screen. An empty idle line draws
    /// nothing; the waterfall owns those rows then.
    pub fn render_status<D: DisplaySink>(&self, sink: &mut D, width: u8, line: &StatusLine) {
        if matches!(
            line,
            StatusLine::Idle {
                caught: None,
                bounds: None
            }
        ) {
            return;
        }
        sink.fill_rect(0, 0, width, STATUS_ROWS, COLOR_BACKGROUND);
        match line {
            StatusLine::Adjust { delay_ms, margin } => {
                sink.draw_small_string(2, TEXT_Y, &format!("{:2}", delay_ms), COLOR_FOREGROUND);
                sink.draw_small_string(
                    width - 11,
                    TEXT_Y,
                    &format!("{:2}", margin),
                    COLOR_FOREGROUND,
                );
            }
            StatusLine::CursorBounds { start, center, end } => {
                sink.draw_small_string(2, TEXT_Y, &format_frequency(*start), COLOR_YELLOW);
                sink.draw_small_string(58, TEXT_Y, &format_frequency(*center), COLOR_YELLOW);
                sink.draw_small_string(112, TEXT_Y, &format_frequency(*end), COLOR_YELLOW);
            }
            StatusLine::Idle { caught, bounds } => {
                if let Some(f) = caught {
                    sink.draw_small_string(58, TEXT_Y, &format_frequency(*f), COLOR_GREEN);
                }
                if let Some(range) = bounds {
                    sink.draw_small_string(2, TEXT_Y, &format_frequency(range.start), COLOR_FOREGROUND);
                    sink.draw_small_string(112, TEXT_Y, &format_frequency(range.end), COLOR_FOREGROUND);
                }
            }
        }
    }

    /// Scrolling history below the status line.
    pub fn render_waterfall<D: DisplaySink>(
        &self,
        sink: &mut D,
        waterfall: &WaterfallBuffer,
        status_visible: bool,
    ) {
        let offset = if status_visible { STATUS_ROWS } else { 0 };
        waterfall.render(sink, offset);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
