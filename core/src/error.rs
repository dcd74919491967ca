/// Configuration-time failures. Steady-state sweep operation never errors:
/// bounded-resource saturation and rejected adjustments are policy results,
/// not failures.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("step index {0} outside the step table")]
    UnknownStepIndex(usize),
}

pub type ScanResult<T> = Result<T, ScanError>;
