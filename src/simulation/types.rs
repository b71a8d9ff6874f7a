//! Core types for the production line simulation
//!
//! These are plain data: the engine produces them, adapters read them.

use serde::Serialize;
use std::time::Duration;

/// Position of a widget along the line.
/// Negative values are queue slots upstream of station 0.
pub type LinePosition = i64;

/// A unique identifier for widgets, stable across ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WidgetId(pub u64);

/// Per-tick classification of a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyState {
    /// No widget at the station
    Empty,
    /// A widget is still being processed
    Working,
    /// Processing finished but the widget could not move on
    Blocked,
}

impl OccupancyState {
    pub const ALL: [OccupancyState; 3] = [
        OccupancyState::Working,
        OccupancyState::Empty,
        OccupancyState::Blocked,
    ];

    /// Short name used for styling and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            OccupancyState::Empty => "empty",
            OccupancyState::Working => "working",
            OccupancyState::Blocked => "blocked",
        }
    }

    /// Text shown next to the state's swatch in a legend
    pub fn legend_label(&self) -> &'static str {
        match self {
            OccupancyState::Empty => "empty",
            OccupancyState::Working => "working",
            OccupancyState::Blocked => "blocked by bottleneck",
        }
    }
}

/// A fixed processing slot on the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub index: usize,
    pub is_bottleneck: bool,
    pub service_time: Duration,
    pub occupancy: OccupancyState,
}

impl Station {
    pub fn new(index: usize, is_bottleneck: bool, service_time: Duration) -> Self {
        Self {
            index,
            is_bottleneck,
            service_time,
            occupancy: OccupancyState::Empty,
        }
    }

    /// Service time in whole seconds, as printed on station labels
    pub fn service_seconds(&self) -> u64 {
        self.service_time.as_secs()
    }

    /// Label such as "1 second" or "5 seconds"
    pub fn service_label(&self) -> String {
        let secs = self.service_time.as_secs_f64();
        if secs == 1.0 {
            "1 second".to_string()
        } else {
            format!("{} seconds", secs)
        }
    }
}

/// A unit travelling down the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub id: WidgetId,
    pub position: LinePosition,
    /// Time accumulated at the current position
    pub elapsed: Duration,
}

impl Widget {
    pub fn queued(id: WidgetId, position: LinePosition) -> Self {
        debug_assert!(position < 0);
        Self {
            id,
            position,
            elapsed: Duration::ZERO,
        }
    }

    /// Index of the station this widget occupies, if any
    pub fn station_index(&self, station_count: usize) -> Option<usize> {
        usize::try_from(self.position)
            .ok()
            .filter(|&index| index < station_count)
    }

    pub fn is_queued(&self) -> bool {
        self.position < 0
    }
}
