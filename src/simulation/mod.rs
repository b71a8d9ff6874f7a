//! Production line simulation engine
//!
//! This module contains the discrete-time model of the line. It performs no
//! rendering and no I/O; snapshots are handed to whatever presents them.

mod config;
mod driver;
mod ids;
mod line;
mod occupancy;
mod stats;
mod types;

pub use config::{
    ConfigurationError, LineConfig, ServiceTimeKind, DEFAULT_BOTTLENECK_INDEX,
    DEFAULT_BOTTLENECK_SERVICE_TIME, DEFAULT_INITIAL_BACKLOG, DEFAULT_NORMAL_SERVICE_TIME,
    DEFAULT_STATION_COUNT, DEFAULT_TARGET_BACKLOG,
};
pub use driver::{PresentationAdapter, TickDriver};
pub use ids::WidgetIdGenerator;
pub use line::LineSnapshot;
pub use occupancy::{classify, derive_station_states};
pub use stats::LineStats;
pub use types::{LinePosition, OccupancyState, Station, Widget, WidgetId};
