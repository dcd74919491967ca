use serde::{Deserialize, Serialize};

/// Selectable sweep step sizes in Hz, indexed by the radio's step setting.
pub const STEP_TABLE: [u32; 10] = [
    250, 500, 625, 1_000, 1_250, 2_500, 5_000, 10_000, 12_500, 25_000,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bandwidth {
    Narrow,
    Wide,
}

/// Channel/VFO storage owned by the surrounding firmware.
///
/// The scan core reads the two VFO frequencies at start to form the root
/// range, writes the chosen frequency back on exit, and asks the store to
/// restore whatever channel state was active before the scan.
pub trait ChannelStore {
    fn vfo_frequencies(&self) -> (u32, u32);
    fn write_back(&mut self, frequency: u32, bandwidth: Bandwidth);
    fn restore(&mut self);
}
