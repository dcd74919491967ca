pub mod channels;
pub mod display;
pub mod hw;
pub mod keys;
pub mod sample;

pub use channels::{Bandwidth, ChannelStore, STEP_TABLE};
pub use display::{DisplaySink, Rgb565};
pub use hw::{Tuner, HIGH_BAND_EDGE_HZ};
pub use keys::{Key, KeyEvent, KeyTracker, Keypad};
pub use sample::{FrequencyRange, Sample};
