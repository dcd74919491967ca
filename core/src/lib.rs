//! Signal-scanning and spectrum-display core for the handheld-scanner
//! platform.
//!
//! Covers the sweep state machine, adaptive squelch, per-column history
//! aggregation, scan memory, zoom navigation, and rendering, behind trait
//! seams for the radio, display, keypad, and channel-store collaborators.

pub mod error;
pub mod math;
pub mod prelude;
pub mod radio_interface;
pub mod render;
pub mod scan;
pub mod session;
pub mod telemetry;

pub use error::{ScanError, ScanResult};
pub use session::{
    InitialTune, ScanSession, SessionConfig, SpectrumModel, StartArgs,
};
