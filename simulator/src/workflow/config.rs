use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use sweepcore::prelude::{Bandwidth, FrequencyRange, InitialTune, SessionConfig, StartArgs};

use crate::rf::{Carrier, EnvironmentConfig};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanJobConfig {
    pub start_hz: u32,
    pub end_hz: u32,
    pub step_index: usize,
    pub passes: usize,
    pub seed: u64,
    pub narrow: bool,
    /// Synthetic transmitters; empty means the default two-repeater scene.
    pub carriers: Vec<Carrier>,
}

impl Default for ScanJobConfig {
    fn default() -> Self {
        Self {
            start_hz: 144_000_000,
            end_hz: 148_000_000,
            step_index: 5,
            passes: 4,
            seed: 0,
            narrow: true,
            carriers: Vec::new(),
        }
    }
}

impl ScanJobConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scan job config {}", path_ref.display()))?;
        let config: ScanJobConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scan job config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(start_hz: u32, end_hz: u32, step_index: usize, passes: usize, seed: u64) -> Self {
        Self {
            start_hz,
            end_hz,
            step_index,
            passes,
            seed,
            ..Self::default()
        }
    }

    pub fn to_start_args(&self) -> anyhow::Result<StartArgs> {
        let range = FrequencyRange::new(self.start_hz.min(self.end_hz), self.end_hz.max(self.start_hz))
            .context("building scan range")?;
        Ok(StartArgs {
            tune: InitialTune::Range(range),
            step_index: self.step_index,
            bandwidth: if self.narrow {
                Bandwidth::Narrow
            } else {
                Bandwidth::Wide
            },
        })
    }

    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig::default()
    }

    pub fn to_environment_config(&self) -> EnvironmentConfig {
        EnvironmentConfig {
            seed: self.seed,
            carriers: self.carriers.clone(),
            ..EnvironmentConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_builds_start_args() {
        let cfg = ScanJobConfig::from_args(144_000_000, 148_000_000, 5, 2, 0);
        let args = cfg.to_start_args().unwrap();
        assert_eq!(args.step_index, 5);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"start_hz: 430000000\nend_hz: 440000000\nstep_index: 8\npasses: 2\nseed: 9\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = ScanJobConfig::load(&path).unwrap();
        assert_eq!(cfg.step_index, 8);
        assert_eq!(cfg.passes, 2);
        assert!(cfg.carriers.is_empty());
    }

    #[test]
    fn reversed_bounds_are_reordered() {
        let cfg = ScanJobConfig::from_args(148_000_000, 144_000_000, 5, 1, 0);
        let args = cfg.to_start_args().unwrap();
        match args.tune {
            InitialTune::Range(range) => {
                assert_eq!(range.start, 144_000_000);
                assert_eq!(range.end, 148_000_000);
            }
            _ => panic!("expected explicit range"),
        }
    }
}
