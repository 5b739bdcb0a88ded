// Utility functions for ranking-service

use std::time::{Duration, Instant};
use tracing::debug;

/// Phase timer for request diagnostics. Owned by the caller for one unit of
/// work; every mark measures the time since the previous mark.
#[derive(Debug)]
pub struct PerfTimer {
    label: String,
    started: Instant,
    last: Instant,
    phases: Vec<(String, Duration)>,
}

impl PerfTimer {
    pub fn start(label: impl Into<String>) -> Self {
        let now = Instant::now();
        Self {
            label: label.into(),
            started: now,
            last: now,
            phases: Vec::new(),
        }
    }

    pub fn mark(&mut self, phase: impl Into<String>) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;

        let phase = phase.into();
        debug!(
            timer = %self.label,
            phase = %phase,
            elapsed_us = elapsed.as_micros() as u64,
            "perf mark"
        );
        self.phases.push((phase, elapsed));
        elapsed
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn finish(self) -> Vec<(String, Duration)> {
        debug!(
            timer = %self.label,
            total_us = self.started.elapsed().as_micros() as u64,
            phases = self.phases.len(),
            "perf timer finished"
        );
        self.phases
    }
}
