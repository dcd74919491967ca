use std::sync::Mutex;

/// Session counters surfaced in snapshots and the simulator report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub passes_completed: usize,
    pub squelch_opens: usize,
}

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_pass(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.passes_completed += 1;
        }
    }

    pub fn record_open(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.squelch_opens += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
