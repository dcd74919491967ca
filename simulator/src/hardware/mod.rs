//! In-memory implementations of the core's hardware contracts, backed by
//! the synthetic RF environment.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sweepcore::prelude::{Bandwidth, ChannelStore, DisplaySink, Key, Keypad, Tuner};

use crate::rf::SignalEnvironment;

/// Tuner over the synthetic scene. Settling waits are skipped so offline
/// runs complete at full speed.
pub struct SimTuner {
    environment: SignalEnvironment,
    tuned_hz: u32,
    pub audio_on: bool,
    pub audio_starts: usize,
}

impl SimTuner {
    pub fn new(environment: SignalEnvironment) -> Self {
        Self {
            environment,
            tuned_hz: 0,
            audio_on: false,
            audio_starts: 0,
        }
    }
}

impl Tuner for SimTuner {
    fn tune_to(&mut self, frequency_hz: u32, _hard: bool) {
        self.tuned_hz = frequency_hz;
    }

    fn select_filter(&mut self, _high_band: bool) {}

    fn read_rssi(&mut self) -> u16 {
        self.environment.rssi_at(self.tuned_hz)
    }

    fn read_noise(&mut self) -> u16 {
        self.environment.noise_at(self.tuned_hz)
    }

    fn start_audio(&mut self) {
        self.audio_on = true;
        self.audio_starts += 1;
    }

    fn end_audio(&mut self) {
        self.audio_on = false;
    }

    fn settle(&mut self, _duration: Duration) {}
}

/// Display sink that counts draw traffic instead of pushing pixels.
#[derive(Default)]
pub struct CountingDisplay {
    pub rects: usize,
    pub texts: usize,
}

impl DisplaySink for CountingDisplay {
    fn fill_rect(&mut self, _x: u8, _y: u8, _width: u8, _height: u8, _color: u16) {
        self.rects += 1;
    }

    fn draw_small_string(&mut self, _x: u8, _y: u8, _text: &str, _color: u16) {
        self.texts += 1;
    }
}

/// Keypad fed from outside the session. Each queued key reads as pressed
/// for exactly one poll; an empty queue reads as released.
#[derive(Clone, Default)]
pub struct RemoteKeypad {
    queue: Arc<Mutex<VecDeque<Key>>>,
}

impl RemoteKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, key: Key) {
        self.queue.lock().unwrap().push_back(key);
    }
}

impl Keypad for RemoteKeypad {
    fn current_key(&mut self) -> Option<Key> {
        self.queue.lock().unwrap().pop_front()
    }
}

/// Channel store holding a fixed VFO pair in memory.
pub struct MemoryChannelStore {
    vfo_a: u32,
    vfo_b: u32,
    pub written: Option<(u32, Bandwidth)>,
    pub restored: bool,
}

impl MemoryChannelStore {
    pub fn new(vfo_a: u32, vfo_b: u32) -> Self {
        Self {
            vfo_a,
            vfo_b,
            written: None,
            restored: false,
        }
    }
}

impl ChannelStore for MemoryChannelStore {
    fn vfo_frequencies(&self) -> (u32, u32) {
        (self.vfo_a, self.vfo_b)
    }

    fn write_back(&mut self, frequency: u32, bandwidth: Bandwidth) {
        self.written = Some((frequency, bandwidth));
    }

    fn restore(&mut self) {
        self.restored = true;
    }
}
