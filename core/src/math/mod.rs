pub mod domain;
pub mod stats;

pub use domain::{ceil_div, clamp, convert_domain, convert_domain_u32, rssi_to_dbm};
pub use stats::StatsHelper;
