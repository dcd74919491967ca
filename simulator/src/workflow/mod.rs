pub mod config;
pub mod runner;

pub use config::ScanJobConfig;
pub use runner::Runner;
