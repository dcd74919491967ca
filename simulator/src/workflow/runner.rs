use anyhow::Context;
use log::info;

use sweepcore::prelude::{
    Key, LootEntry, ScanSession, ScanState, SpectrumModel, STEP_TABLE,
};

use crate::hardware::{CountingDisplay, MemoryChannelStore, RemoteKeypad, SimTuner};
use crate::rf::SignalEnvironment;
use crate::workflow::config::ScanJobConfig;

/// Ticks spent listening on one catch before the runner blacklists it and
/// lets the sweep move on. Synthetic carriers never stop transmitting.
const LISTEN_TICKS: usize = 50;

/// Summary of an offline scan run.
pub struct ScanReport {
    pub passes_completed: usize,
    pub squelch_opens: usize,
    pub filled_points: usize,
    pub loot: Vec<LootEntry>,
    pub model: SpectrumModel,
}

impl ScanReport {
    pub fn caught_frequencies(&self) -> Vec<u32> {
        self.loot.iter().map(|entry| entry.frequency).collect()
    }
}

#[derive(Clone)]
pub struct Runner {
    config: ScanJobConfig,
}

impl Runner {
    pub fn new(config: ScanJobConfig) -> Self {
        Self { config }
    }

    /// Drives a session over the synthetic environment until the requested
    /// number of sweep passes complete, then tears it down.
    pub fn execute(&self) -> anyhow::Result<ScanReport> {
        let environment = if self.config.carriers.is_empty() {
            SignalEnvironment::default_scene(self.config.seed)
        } else {
            SignalEnvironment::new(self.config.to_environment_config())
        };

        let tuner = SimTuner::new(environment);
        let display = CountingDisplay::default();
        let keypad = RemoteKeypad::new();
        let operator = keypad.clone();
        let channels = MemoryChannelStore::new(self.config.start_hz, self.config.end_hz);

        let args = self.config.to_start_args()?;
        let step_hz = STEP_TABLE
            .get(self.config.step_index)
            .copied()
            .unwrap_or(1);
        let mut session = ScanSession::start(
            tuner,
            display,
            keypad,
            channels,
            self.config.to_session_config(),
            args,
        )
        .context("starting scan session")?;

        let steps = session.active_range().steps(step_hz) as usize;
        let tick_budget = self
            .config
            .passes
            .saturating_mul(steps.saturating_add(LISTEN_TICKS * steps))
            .max(10_000);

        let mut now_ms: u32 = 0;
        let mut ticks = 0usize;
        let mut held_ticks = 0usize;
        while session.metrics().passes_completed < self.config.passes {
            session.tick(now_ms);
            session.handle_key(now_ms);

            if session.scan_state() == ScanState::Listening {
                held_ticks += 1;
                if held_ticks >= LISTEN_TICKS {
                    operator.press(Key::Digit5);
                    held_ticks = 0;
                }
            } else {
                held_ticks = 0;
            }

            now_ms = now_ms.wrapping_add(5);
            ticks += 1;
            if ticks > tick_budget {
                anyhow::bail!(
                    "scan stalled after {} ticks with {} passes complete",
                    ticks,
                    session.metrics().passes_completed
                );
            }
        }

        let model = session.snapshot();
        let metrics = session.metrics();
        let report = ScanReport {
            passes_completed: metrics.passes_completed,
            squelch_opens: metrics.squelch_opens,
            filled_points: session.filled_points(),
            loot: session.loot().entries().to_vec(),
            model,
        };
        session.stop();

        info!(
            "offline run complete: {} passes, {} opens, {} loot entries",
            report.passes_completed,
            report.squelch_opens,
            report.loot.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rf::Carrier;

    fn repeater_job() -> ScanJobConfig {
        let mut cfg = ScanJobConfig::from_args(145_400_000, 145_600_000, 9, 3, 7);
        cfg.carriers = vec![Carrier {
            frequency_hz: 145_500_000,
            strength: 40,
            width_hz: 25_000,
        }];
        cfg
    }

    #[test]
    fn runner_completes_requested_passes() {
        let report = Runner::new(repeater_job()).execute().unwrap();
        assert_eq!(report.passes_completed, 3);
        assert!(report.filled_points > 0);
        assert_eq!(report.model.passes_completed, 3);
    }

    #[test]
    fn strong_carrier_lands_in_the_loot_table() {
        let report = Runner::new(repeater_job()).execute().unwrap();
        assert!(report
            .caught_frequencies()
            .iter()
            .any(|&f| (145_475_000..=145_525_000).contains(&f)));
        assert!(report.squelch_opens >= 1);
    }

    #[test]
    fn quiet_band_catches_nothing() {
        let mut cfg = ScanJobConfig::from_args(430_000_000, 430_200_000, 9, 2, 11);
        cfg.carriers = vec![Carrier {
            frequency_hz: 446_000_000,
            strength: 40,
            width_hz: 12_500,
        }];
        let report = Runner::new(cfg).execute().unwrap();
        assert_eq!(report.passes_completed, 2);
        assert!(report.loot.is_empty());
    }
}
