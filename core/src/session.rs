use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ScanError, ScanResult};
use crate::math::rssi_to_dbm;
use crate::radio_interface::{
    Bandwidth, ChannelStore, DisplaySink, FrequencyRange, Key, KeyTracker, Keypad, Sample, Tuner,
    STEP_TABLE,
};
use crate::render::{GradientMapper, Renderer, StatusLine, WaterfallBuffer};
use crate::scan::{
    Cursor, LootEntry, LootTable, ScanState, SpectrumHistory, SquelchDetector, SweepController,
    Transition, ZoomStack,
};
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};

pub const DELAY_MS_MIN: u8 = 1;
pub const DELAY_MS_MAX: u8 = 20;
pub const NOISE_OPEN_DIFF_MIN: u16 = 1;
pub const NOISE_OPEN_DIFF_MAX: u16 = 40;

/// How long adjustment/cursor readouts stay on the status line.
const STATUS_TIMEOUT_MS: u32 = 3_000;

/// Operator-tunable session parameters, validated before scanning starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub width: u8,
    pub delay_ms: u8,
    pub hard: bool,
    pub noise_open_diff: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 160,
            delay_ms: 3,
            hard: true,
            noise_open_diff: 14,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ScanResult<()> {
        if self.width < 2 || self.width as usize > crate::scan::MAX_POINTS || self.width % 2 != 0 {
            return Err(ScanError::InvalidConfig(format!(
                "width {} must be even and within 2..={}",
                self.width,
                crate::scan::MAX_POINTS
            )));
        }
        if !(DELAY_MS_MIN..=DELAY_MS_MAX).contains(&self.delay_ms) {
            return Err(ScanError::InvalidConfig(format!(
                "delay {} ms outside {}..={}",
                self.delay_ms, DELAY_MS_MIN, DELAY_MS_MAX
            )));
        }
        if !(NOISE_OPEN_DIFF_MIN..=NOISE_OPEN_DIFF_MAX).contains(&self.noise_open_diff) {
            return Err(ScanError::InvalidConfig(format!(
                "noise-open difference {} outside {}..={}",
                self.noise_open_diff, NOISE_OPEN_DIFF_MIN, NOISE_OPEN_DIFF_MAX
            )));
        }
        Ok(())
    }
}

/// Where the root range comes from.
#[derive(Debug, Clone, Copy)]
pub enum InitialTune {
    /// Span between the two stored VFO frequencies, ordered.
    VfoPair,
    /// Explicit range.
    Range(FrequencyRange),
    /// Centered on a frequency, one step per display column.
    Center(u32),
}

#[derive(Debug, Clone, Copy)]
pub struct StartArgs {
    pub tune: InitialTune,
    pub step_index: usize,
    pub bandwidth: Bandwidth,
}

/// Serializable snapshot of the live scan state, for bridges and reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpectrumModel {
    pub range_start: u32,
    pub range_end: u32,
    pub column_dbm: Vec<i16>,
    pub dbm_window: (i16, i16),
    pub loot: Vec<LootEntry>,
    pub passes_completed: usize,
    pub squelch_opens: usize,
}

/// One scan session: the owned context for every "current X" of the sweep.
///
/// Single-threaded and cooperative by design. The caller alternates `tick`
/// (one sweep step) with `handle_key` (one input poll); the only blocking
/// inside is the tuner settling wait.
pub struct ScanSession<T, D, K, C>
where
    T: Tuner,
    D: DisplaySink,
    K: Keypad,
    C: ChannelStore,
{
    tuner: T,
    display: D,
    keypad: K,
    channels: C,

    sweep: SweepController,
    squelch: SquelchDetector,
    history: SpectrumHistory,
    loot: LootTable,
    zoom: ZoomStack,
    cursor: Cursor,
    waterfall: WaterfallBuffer,
    mapper: GradientMapper,
    renderer: Renderer,
    tracker: KeyTracker,
    metrics: MetricsRecorder,
    logger: LogManager,

    width: u8,
    delay_ms: u8,
    hard: bool,
    noise_open_diff: u16,
    show_bounds: bool,
    bandwidth: Bandwidth,

    running: bool,
    dirty: bool,
    now_ms: u32,
    last_adjust_ms: Option<u32>,
    last_cursor_ms: Option<u32>,
}

impl<T, D, K, C> ScanSession<T, D, K, C>
where
    T: Tuner,
    D: DisplaySink,
    K: Keypad,
    C: ChannelStore,
{
    pub fn start(
        tuner: T,
        mut display: D,
        keypad: K,
        channels: C,
        config: SessionConfig,
        args: StartArgs,
    ) -> ScanResult<Self> {
        config.validate()?;
        let step_hz = *STEP_TABLE
            .get(args.step_index)
            .ok_or(ScanError::UnknownStepIndex(args.step_index))?;

        let range = match args.tune {
            InitialTune::Range(range) => range,
            InitialTune::VfoPair => {
                let (f1, f2) = channels.vfo_frequencies();
                FrequencyRange::ordered(f1, f2)
            }
            InitialTune::Center(center) => {
                let half = (config.width as u32 - 1) * step_hz / 2;
                FrequencyRange {
                    start: center.saturating_sub(half),
                    end: center.saturating_add(half),
                }
            }
        };

        let sweep = SweepController::new(range, step_hz)?;
        let mut history = SpectrumHistory::new();
        history.init(sweep.steps(), config.width as usize)?;

        let mut renderer = Renderer::new();
        renderer.full_reset(&mut display);

        let logger = LogManager::new("session");
        logger.record(&format!(
            "scan session {}..{} Hz step {} Hz",
            range.start, range.end, step_hz
        ));

        let mut session = Self {
            tuner,
            display,
            keypad,
            channels,
            sweep,
            squelch: SquelchDetector::new(),
            history,
            loot: LootTable::new(),
            zoom: ZoomStack::new(range),
            cursor: Cursor::new(config.width as u32),
            waterfall: WaterfallBuffer::new(),
            mapper: GradientMapper::new(),
            renderer,
            tracker: KeyTracker::new(),
            metrics: MetricsRecorder::new(),
            logger,
            width: config.width,
            delay_ms: config.delay_ms,
            hard: config.hard,
            noise_open_diff: config.noise_open_diff,
            show_bounds: false,
            bandwidth: args.bandwidth,
            running: true,
            dirty: false,
            now_ms: 0,
            last_adjust_ms: None,
            last_cursor_ms: None,
        };
        session.render_frame(false);
        Ok(session)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_frequency(&self) -> u32 {
        self.sweep.current_frequency()
    }

    pub fn active_range(&self) -> FrequencyRange {
        self.zoom.active()
    }

    pub fn zoom_depth(&self) -> usize {
        self.zoom.depth()
    }

    pub fn scan_state(&self) -> ScanState {
        self.squelch.state()
    }

    pub fn loot(&self) -> &LootTable {
        &self.loot
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn filled_points(&self) -> usize {
        self.history.filled_points()
    }

    pub fn noise_open_diff(&self) -> u16 {
        self.noise_open_diff
    }

    pub fn delay_ms(&self) -> u8 {
        self.delay_ms
    }

    /// One cooperative loop iteration: advance the sweep by a single step.
    pub fn tick(&mut self, now_ms: u32) {
        if !self.running {
            return;
        }
        self.now_ms = now_ms;

        if self.squelch.state() == ScanState::Scanning {
            self.sweep.tune(
                &mut self.tuner,
                Duration::from_millis(self.delay_ms as u64),
                self.hard,
            );
        }

        let mut sample = Sample::at(self.sweep.current_frequency());
        sample.rssi = self.tuner.read_rssi();
        sample.noise = self.tuner.read_noise();

        self.squelch.measure(&mut sample, self.noise_open_diff);
        self.loot.record(&mut sample);
        self.history.add_sample(&sample);

        match self.squelch.transition(&sample) {
            Transition::Opened => {
                self.metrics.record_open();
                self.tuner.start_audio();
                self.logger
                    .record(&format!("squelch open at {} Hz", sample.frequency));
                self.dirty = true;
            }
            Transition::Closed => {
                self.tuner.end_audio();
                self.dirty = true;
            }
            Transition::None => {}
        }

        if self.squelch.state() == ScanState::Listening {
            // Hold the caught frequency; sweeping resumes from here after
            // close.
            if self.dirty {
                self.render_frame(false);
                self.dirty = false;
            }
            return;
        }

        self.history.next();
        if self.sweep.advance() {
            self.complete_pass();
        } else if self.dirty {
            self.render_frame(false);
            self.dirty = false;
        }
    }

    /// Pass wraparound: recompute adaptive thresholds from this pass's
    /// statistics, scroll the waterfall, redraw, and restart.
    fn complete_pass(&mut self) {
        self.squelch.update_thresholds(
            self.history.noise_floor(),
            self.history.noise_max(),
            self.noise_open_diff,
        );
        self.metrics.record_pass();
        // The gradient window rescales on fresh statistics, so every bar
        // height is stale.
        self.history.mark_all_dirty();
        self.render_frame(true);
        self.history.begin();
        self.dirty = false;
    }

    /// One input poll. Returns whether the key did anything; rejected
    /// adjustments (cursor at an edge, tunable at its bound) return false.
    pub fn handle_key(&mut self, now_ms: u32) -> bool {
        self.now_ms = now_ms;
        let key = self.keypad.current_key();
        let Some(event) = self.tracker.update(key, now_ms) else {
            return false;
        };

        // Repeatable adjustments act on both new presses and hold repeats.
        let adjusted = match event.key {
            Key::Up => self.cursor_adjust(|cursor| cursor.move_by(true)),
            Key::Down => self.cursor_adjust(|cursor| cursor.move_by(false)),
            Key::Digit2 => self.cursor_adjust(|cursor| cursor.resize(true)),
            Key::Digit8 => self.cursor_adjust(|cursor| cursor.resize(false)),
            Key::Digit1 => self.adjust_delay(true),
            Key::Digit7 => self.adjust_delay(false),
            Key::Digit3 => self.adjust_margin(true),
            Key::Digit9 => self.adjust_margin(false),
            _ => false,
        };
        if adjusted {
            self.render_overlay();
            return true;
        }

        if !event.is_new {
            return false;
        }
        match event.key {
            Key::Menu => {
                let zoomed = self
                    .cursor
                    .frequency_range(&self.zoom.active(), self.sweep.step_hz());
                self.zoom.push(zoomed);
                self.reinit();
                true
            }
            Key::Exit => {
                if self.zoom.pop() {
                    self.reinit();
                } else {
                    self.stop();
                }
                true
            }
            Key::Digit4 => {
                self.hard = !self.hard;
                true
            }
            Key::Star => {
                self.show_bounds = !self.show_bounds;
                self.render_overlay();
                true
            }
            Key::Digit5 => self.loot.blacklist_last(),
            Key::Digit0 => self.loot.mark_known_good_last(),
            _ => false,
        }
    }

    /// Ends the session, restoring the radio to its pre-scan channel state.
    pub fn stop(&mut self) {
        if self.squelch.state() == ScanState::Listening {
            self.tuner.end_audio();
        }
        let chosen = self
            .squelch
            .caught()
            .map(|sample| sample.frequency)
            .unwrap_or_else(|| self.sweep.current_frequency());
        self.channels.write_back(chosen, self.bandwidth);
        self.channels.restore();
        self.squelch.reset_state();
        self.running = false;
        self.logger
            .record(&format!("scan stopped, wrote back {} Hz", chosen));
    }

    pub fn snapshot(&self) -> SpectrumModel {
        let range = self.zoom.active();
        let metrics = self.metrics.snapshot();
        SpectrumModel {
            range_start: range.start,
            range_end: range.end,
            column_dbm: self.history.peaks().iter().map(|&v| rssi_to_dbm(v)).collect(),
            dbm_window: self.mapper.window(),
            loot: self.loot.entries().to_vec(),
            passes_completed: metrics.passes_completed,
            squelch_opens: metrics.squelch_opens,
        }
    }

    fn cursor_adjust<F: FnOnce(&mut Cursor) -> bool>(&mut self, op: F) -> bool {
        if op(&mut self.cursor) {
            self.last_cursor_ms = Some(self.now_ms);
            true
        } else {
            false
        }
    }

    fn adjust_delay(&mut self, up: bool) -> bool {
        let changed = if up {
            if self.delay_ms < DELAY_MS_MAX {
                self.delay_ms += 1;
                true
            } else {
                false
            }
        } else if self.delay_ms > DELAY_MS_MIN {
            self.delay_ms -= 1;
            true
        } else {
            false
        };
        if changed {
            self.last_adjust_ms = Some(self.now_ms);
        }
        changed
    }

    fn adjust_margin(&mut self, up: bool) -> bool {
        let changed = if up {
            if self.noise_open_diff < NOISE_OPEN_DIFF_MAX {
                self.noise_open_diff += 1;
                true
            } else {
                false
            }
        } else if self.noise_open_diff > NOISE_OPEN_DIFF_MIN {
            self.noise_open_diff -= 1;
            true
        } else {
            false
        };
        if changed {
            self.last_adjust_ms = Some(self.now_ms);
        }
        changed
    }

    /// Reinitializes the sweep against the zoom stack's new top range.
    fn reinit(&mut self) {
        let range = self.zoom.active();
        self.sweep.retarget(range);
        if let Err(err) = self
            .history
            .init(self.sweep.steps(), self.width as usize)
        {
            // Width was validated at start; steps are never zero.
            self.logger.record(&format!("history reinit: {}", err));
        }
        self.cursor.reset();
        self.waterfall.clear();
        if self.squelch.state() == ScanState::Listening {
            self.tuner.end_audio();
        }
        self.squelch.reset_state();
        self.renderer.full_reset(&mut self.display);
        self.render_frame(false);
    }

    fn status_line(&self) -> StatusLine {
        let recent = |stamp: Option<u32>| {
            stamp.map_or(false, |at| self.now_ms.wrapping_sub(at) < STATUS_TIMEOUT_MS)
        };
        if recent(self.last_adjust_ms) {
            StatusLine::Adjust {
                delay_ms: self.delay_ms,
                margin: self.noise_open_diff,
            }
        } else if recent(self.last_cursor_ms) {
            let active = self.zoom.active();
            let step = self.sweep.step_hz();
            let bounds = self.cursor.frequency_range(&active, step);
            StatusLine::CursorBounds {
                start: bounds.start,
                center: self.cursor.center_frequency(&active, step),
                end: bounds.end,
            }
        } else {
            StatusLine::Idle {
                caught: self.squelch.caught().map(|sample| sample.frequency),
                bounds: self.show_bounds.then(|| self.zoom.active()),
            }
        }
    }

    /// Full frame: spectrum bars, waterfall (scrolled on pass completion),
    /// cursor and status line.
    fn render_frame(&mut self, push_waterfall: bool) {
        let range = self.zoom.active();
        self.renderer.render_spectrum(
            &mut self.display,
            &mut self.history,
            &mut self.mapper,
            &range,
        );
        if push_waterfall {
            self.waterfall.push_row(&self.history, &self.mapper);
        }
        let status = self.status_line();
        let status_visible = !matches!(
            status,
            StatusLine::Idle {
                caught: None,
                bounds: None
            }
        );
        self.renderer
            .render_waterfall(&mut self.display, &self.waterfall, status_visible);
        self.renderer
            .render_cursor(&mut self.display, &self.cursor, self.width);
        if let Some(sample) = self.squelch.caught() {
            self.renderer
                .render_arrow(&mut self.display, &range, sample.frequency, self.width);
        }
        self.renderer.render_status(&mut self.display, self.width, &status);
    }

    /// Cursor/status redraw without touching the spectrum, used from key
    /// handling.
    fn render_overlay(&mut self) {
        self.renderer
            .render_cursor(&mut self.display, &self.cursor, self.width);
        let status = self.status_line();
        self.renderer.render_status(&mut self.display, self.width, &status);
    }
}
