use std::time::Duration;

/// Abstract contract over the receiver chip driver.
///
/// The sweep controller owns band selection policy (frequencies at or above
/// 24 MHz take the high-band filter) and only calls `select_filter` when the
/// band actually changes. `settle` is a blocking wait for synthesizer
/// lock; simulations may no-op it.
pub trait Tuner {
    fn tune_to(&mut self, frequency_hz: u32, hard: bool);
    fn select_filter(&mut self, high_band: bool);
    fn read_rssi(&mut self) -> u16;
    fn read_noise(&mut self) -> u16;
    fn start_audio(&mut self);
    fn end_audio(&mut self);
    fn settle(&mut self, duration: Duration);
}

/// Boundary frequency between the low-band and high-band front-end filters.
pub const HIGH_BAND_EDGE_HZ: u32 = 24_000_000;
