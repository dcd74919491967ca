use serde::{Deserialize, Serialize};

use crate::radio_interface::Sample;
use crate::telemetry::LogManager;

/// Fixed bound on remembered frequencies; saturation is a silent drop.
pub const LOOT_CAPACITY: usize = 64;

/// A remembered frequency where squelch once opened. Persists across sweep
/// passes and zoom changes until the session ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LootEntry {
    pub frequency: u32,
    pub rssi: u16,
    pub blacklist: bool,
    pub known_good: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone_code: Option<u16>,
}

impl LootEntry {
    fn from_sample(sample: &Sample) -> Self {
        Self {
            frequency: sample.frequency,
            rssi: sample.rssi,
            blacklist: false,
            known_good: false,
            tone_code: sample.tone_code,
        }
    }
}

/// Deduplicated scan memory, exact-frequency matched by linear scan.
pub struct LootTable {
    entries: Vec<LootEntry>,
    last_active: Option<usize>,
    logger: LogManager,
}

impl LootTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(LOOT_CAPACITY),
            last_active: None,
            logger: LogManager::new("loot"),
        }
    }

    pub fn lookup(&self, frequency: u32) -> Option<&LootEntry> {
        self.entries.iter().find(|e| e.frequency == frequency)
    }

    fn position(&self, frequency: u32) -> Option<usize> {
        self.entries.iter().position(|e| e.frequency == frequency)
    }

    /// Feeds one measured sample through the table.
    ///
    /// Creates an entry on open squelch while capacity remains. An existing
    /// (or just-created) entry then acts on the sample: blacklisted or
    /// known-good entries suppress the open flag outright; otherwise the
    /// entry takes the latest RSSI and either side inherits the other's tone
    /// state.
    pub fn record(&mut self, sample: &mut Sample) {
        let index = match self.position(sample.frequency) {
            Some(index) => Some(index),
            None if sample.open && self.entries.len() < LOOT_CAPACITY => {
                self.entries.push(LootEntry::from_sample(sample));
                self.logger.record(&format!(
                    "loot added {} Hz ({} of {})",
                    sample.frequency,
                    self.entries.len(),
                    LOOT_CAPACITY
                ));
                Some(self.entries.len() - 1)
            }
            None => None,
        };

        let Some(index) = index else { return };
        let entry = &mut self.entries[index];

        sample.blacklist = entry.blacklist;
        sample.known_good = entry.known_good;
        if entry.blacklist || entry.known_good {
            sample.open = false;
            return;
        }
        if sample.open {
            entry.rssi = sample.rssi;
            self.last_active = Some(index);
        }
        match sample.tone_code {
            Some(code) => entry.tone_code = Some(code),
            None => sample.tone_code = entry.tone_code,
        }
    }

    /// Toggles the blacklist flag on the most recently active entry.
    /// Mutually exclusive with known-good.
    pub fn blacklist_last(&mut self) -> bool {
        let Some(index) = self.last_active else {
            return false;
        };
        let entry = &mut self.entries[index];
        entry.blacklist = !entry.blacklist;
        if entry.blacklist {
            entry.known_good = false;
        }
        true
    }

    /// Toggles the known-good flag on the most recently active entry.
    /// Mutually exclusive with blacklist.
    pub fn mark_known_good_last(&mut self) -> bool {
        let Some(index) = self.last_active else {
            return false;
        };
        let entry = &mut self.entries[index];
        entry.known_good = !entry.known_good;
        if entry.known_good {
            entry.blacklist = false;
        }
        true
    }

    pub fn entries(&self) -> &[LootEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= LOOT_CAPACITY
    }
}

impl Default for LootTable {
    fn default() -> Self {
        Self::new()
    }
}
