//! Fixed-interval tick driver
//!
//! The driver owns timing only. It feeds each snapshot to a
//! `PresentationAdapter` and never looks inside the line itself.

use anyhow::{Context, Result};
use log::info;
use std::time::Duration;

use super::line::LineSnapshot;
use super::stats::LineStats;

/// Consumer of snapshots, e.g. a renderer
pub trait PresentationAdapter {
    /// Called once with the initial state and then once after every tick
    fn present(&mut self, snapshot: &LineSnapshot) -> Result<()>;

    /// Called after the last tick
    fn finish(&mut self, _stats: &LineStats) -> Result<()> {
        Ok(())
    }
}

/// Calls `advance` at a fixed interval
#[derive(Debug, Clone)]
pub struct TickDriver {
    interval: Duration,
    /// Sleep for `interval` between ticks
    realtime: bool,
}

impl TickDriver {
    /// A driver whose interval matches the line's normal service time.
    /// The same value is passed to `advance`, so elapsed time stays uniform.
    pub fn for_line(snapshot: &LineSnapshot, realtime: bool) -> Self {
        Self {
            interval: snapshot.config().normal_service_time,
            realtime,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run `ticks` ticks starting from `initial`, returning the final snapshot
    /// and the run statistics.
    pub fn run<A: PresentationAdapter + ?Sized>(
        &self,
        initial: LineSnapshot,
        ticks: u64,
        adapter: &mut A,
    ) -> Result<(LineSnapshot, LineStats)> {
        info!(
            "Running {} ticks of {:?}{}",
            ticks,
            self.interval,
            if self.realtime { "" } else { " (no wait)" }
        );

        let mut stats = LineStats::new();
        adapter
            .present(&initial)
            .context("Failed to present initial state")?;

        let mut snapshot = initial;
        for _ in 0..ticks {
            if self.realtime {
                std::thread::sleep(self.interval);
            }
            snapshot = snapshot.advance(self.interval);
            stats.record(&snapshot);
            adapter
                .present(&snapshot)
                .with_context(|| format!("Failed to present tick {}", snapshot.tick()))?;
        }

        adapter.finish(&stats).context("Failed to finish presentation")?;
        stats.log_summary();
        Ok((snapshot, stats))
    }
}
