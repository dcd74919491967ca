use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A synthetic transmitter in the simulated band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carrier {
    pub frequency_hz: u32,
    /// Raw RSSI units added at the carrier center.
    pub strength: u16,
    /// Half-power width of the carrier's footprint.
    pub width_hz: u32,
}

/// Configuration for a synthetic RF scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub seed: u64,
    pub base_rssi: u16,
    pub base_noise: u16,
    pub jitter: u16,
    pub carriers: Vec<Carrier>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            base_rssi: 60,
            base_noise: 80,
            jitter: 2,
            carriers: Vec::new(),
        }
    }
}

/// Deterministic RF scene the simulated tuner samples from.
pub struct SignalEnvironment {
    config: EnvironmentConfig,
    rng: StdRng,
}

impl SignalEnvironment {
    pub fn new(config: EnvironmentConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// A quiet band with a pair of active repeaters, used when no scene is
    /// configured.
    pub fn default_scene(seed: u64) -> Self {
        Self::new(EnvironmentConfig {
            seed,
            carriers: vec![
                Carrier {
                    frequency_hz: 145_500_000,
                    strength: 60,
                    width_hz: 12_500,
                },
                Carrier {
                    frequency_hz: 146_520_000,
                    strength: 40,
                    width_hz: 12_500,
                },
            ],
            ..EnvironmentConfig::default()
        })
    }

    fn carrier_contribution(&self, frequency_hz: u32) -> u16 {
        self.config
            .carriers
            .iter()
            .map(|carrier| {
                let distance = frequency_hz.abs_diff(carrier.frequency_hz);
                if distance >= carrier.width_hz * 2 {
                    0
                } else {
                    // Linear falloff over twice the carrier width.
                    let scale = carrier.width_hz * 2 - distance;
                    (carrier.strength as u32 * scale / (carrier.width_hz * 2)) as u16
                }
            })
            .max()
            .unwrap_or(0)
    }

    pub fn rssi_at(&mut self, frequency_hz: u32) -> u16 {
        let jitter = self.rng.gen_range(0..=self.config.jitter);
        self.config.base_rssi + self.carrier_contribution(frequency_hz) + jitter
    }

    /// Noise drops where a carrier dominates the channel.
    pub fn noise_at(&mut self, frequency_hz: u32) -> u16 {
        let jitter = self.rng.gen_range(0..=self.config.jitter);
        let quieting = self.carrier_contribution(frequency_hz).min(self.config.base_noise);
        self.config.base_noise - quieting + jitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_carrier_scene() -> SignalEnvironment {
        SignalEnvironment::new(EnvironmentConfig {
            jitter: 0,
            carriers: vec![Carrier {
                frequency_hz: 145_500_000,
                strength: 60,
                width_hz: 12_500,
            }],
            ..EnvironmentConfig::default()
        })
    }

    #[test]
    fn carrier_raises_rssi_and_quiets_noise() {
        let mut environment = single_carrier_scene();
        assert_eq!(environment.rssi_at(145_500_000), 120);
        assert_eq!(environment.noise_at(145_500_000), 20);
        assert_eq!(environment.rssi_at(144_000_000), 60);
        assert_eq!(environment.noise_at(144_000_000), 80);
    }

    #[test]
    fn carrier_footprint_falls_off_with_distance() {
        let mut environment = single_carrier_scene();
        let center = environment.rssi_at(145_500_000);
        let shoulder = environment.rssi_at(145_512_500);
        let outside = environment.rssi_at(145_525_000);
        assert!(center > shoulder);
        assert_eq!(outside, 60);
    }

    #[test]
    fn seeded_scenes_are_reproducible() {
        let mut a = SignalEnvironment::default_scene(7);
        let mut b = SignalEnvironment::default_scene(7);
        for f in (144_000_000..144_100_000).step_by(25_000) {
            assert_eq!(a.rssi_at(f), b.rssi_at(f));
        }
    }
}
