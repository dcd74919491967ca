pub mod cursor;
pub mod history;
pub mod loot;
pub mod squelch;
pub mod sweep;
pub mod zoom;

pub use cursor::Cursor;
pub use history::{SpectrumHistory, MAX_POINTS};
pub use loot::{LootEntry, LootTable, LOOT_CAPACITY};
pub use squelch::{ScanState, SquelchDetector, SquelchThresholds, Transition};
pub use sweep::SweepController;
pub use zoom::{ZoomStack, ZOOM_CAPACITY};
