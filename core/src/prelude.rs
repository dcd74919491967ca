pub use crate::error::{ScanError, ScanResult};
pub use crate::radio_interface::{
    Bandwidth, ChannelStore, DisplaySink, FrequencyRange, Key, Keypad, Sample, Tuner, STEP_TABLE,
};
pub use crate::scan::{LootEntry, ScanState};
pub use crate::session::{
    InitialTune, ScanSession, SessionConfig, SpectrumModel, StartArgs,
};
pub use crate::telemetry::MetricsSnapshot;
