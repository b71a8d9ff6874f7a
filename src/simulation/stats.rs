//! Run statistics gathered from successive snapshots

use log::info;
use std::time::Duration;

use super::line::LineSnapshot;
use super::types::OccupancyState;

/// Counters accumulated over a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStats {
    pub ticks: u64,
    pub simulated_time: Duration,
    pub widgets_created: u64,
    pub widgets_exited: u64,
    pub active_widgets: usize,
    /// Station-ticks spent in each state, summed over all stations
    pub working_station_ticks: u64,
    pub blocked_station_ticks: u64,
    pub empty_station_ticks: u64,
}

impl LineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one snapshot into the counters
    pub fn record(&mut self, snapshot: &LineSnapshot) {
        self.ticks = snapshot.tick();
        self.simulated_time = snapshot.clock();
        self.widgets_created = snapshot.created_total();
        self.widgets_exited = snapshot.exited_total();
        self.active_widgets = snapshot.widgets().len();

        for station in snapshot.stations() {
            match station.occupancy {
                OccupancyState::Working => self.working_station_ticks += 1,
                OccupancyState::Blocked => self.blocked_station_ticks += 1,
                OccupancyState::Empty => self.empty_station_ticks += 1,
            }
        }
    }

    /// Widgets finished per simulated second
    pub fn throughput(&self) -> f64 {
        let secs = self.simulated_time.as_secs_f64();
        if secs > 0.0 {
            self.widgets_exited as f64 / secs
        } else {
            0.0
        }
    }

    /// Share of recorded station-ticks spent in `state`, as a percentage
    pub fn share(&self, state: OccupancyState) -> f64 {
        let total =
            self.working_station_ticks + self.blocked_station_ticks + self.empty_station_ticks;
        if total == 0 {
            return 0.0;
        }
        let count = match state {
            OccupancyState::Working => self.working_station_ticks,
            OccupancyState::Blocked => self.blocked_station_ticks,
            OccupancyState::Empty => self.empty_station_ticks,
        };
        count as f64 / total as f64 * 100.0
    }

    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Ticks: {}", self.ticks);
        info!("Simulated time: {:.1}s", self.simulated_time.as_secs_f64());
        info!("Widgets created: {}", self.widgets_created);
        info!("Widgets exited: {}", self.widgets_exited);
        info!("Active widgets: {}", self.active_widgets);
        info!("Throughput: {:.3} widgets/s", self.throughput());
        info!(
            "Station time working/blocked/empty: {:.1}% / {:.1}% / {:.1}%",
            self.share(OccupancyState::Working),
            self.share(OccupancyState::Blocked),
            self.share(OccupancyState::Empty)
        );
    }
}
