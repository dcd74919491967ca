pub mod environment;

pub use environment::{Carrier, EnvironmentConfig, SignalEnvironment};
