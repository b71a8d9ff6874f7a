//! Line configuration and validation
//!
//! All values are fixed for the lifetime of a run.

use std::time::Duration;
use thiserror::Error;

/// Number of stations on the default line
pub const DEFAULT_STATION_COUNT: usize = 8;
/// Index of the slow station on the default line
pub const DEFAULT_BOTTLENECK_INDEX: usize = 3;
/// Service time of an ordinary station
pub const DEFAULT_NORMAL_SERVICE_TIME: Duration = Duration::from_millis(1000);
/// Service time of the bottleneck station
pub const DEFAULT_BOTTLENECK_SERVICE_TIME: Duration = Duration::from_millis(5000);
/// Widgets queued when a run starts
pub const DEFAULT_INITIAL_BACKLOG: usize = 6;
/// Active widget count that replenishment maintains
pub const DEFAULT_TARGET_BACKLOG: usize = 6;

/// Which service time a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceTimeKind {
    Normal,
    Bottleneck,
}

impl std::fmt::Display for ServiceTimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceTimeKind::Normal => write!(f, "normal"),
            ServiceTimeKind::Bottleneck => write!(f, "bottleneck"),
        }
    }
}

/// Errors raised when a run is configured with impossible values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("a line needs at least one station")]
    NoStations,
    #[error("bottleneck index {index} is outside the line of {station_count} stations")]
    BottleneckOutOfRange { index: usize, station_count: usize },
    #[error("{which} service time must be positive")]
    ZeroServiceTime { which: ServiceTimeKind },
}

/// Configuration accepted when a line is initialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineConfig {
    pub station_count: usize,
    pub bottleneck_index: usize,
    pub normal_service_time: Duration,
    pub bottleneck_service_time: Duration,
    pub initial_backlog: usize,
    pub target_backlog: usize,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            station_count: DEFAULT_STATION_COUNT,
            bottleneck_index: DEFAULT_BOTTLENECK_INDEX,
            normal_service_time: DEFAULT_NORMAL_SERVICE_TIME,
            bottleneck_service_time: DEFAULT_BOTTLENECK_SERVICE_TIME,
            initial_backlog: DEFAULT_INITIAL_BACKLOG,
            target_backlog: DEFAULT_TARGET_BACKLOG,
        }
    }
}

impl LineConfig {
    /// Check the configuration before a run starts
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.station_count == 0 {
            return Err(ConfigurationError::NoStations);
        }
        if self.bottleneck_index >= self.station_count {
            return Err(ConfigurationError::BottleneckOutOfRange {
                index: self.bottleneck_index,
                station_count: self.station_count,
            });
        }
        if self.normal_service_time.is_zero() {
            return Err(ConfigurationError::ZeroServiceTime {
                which: ServiceTimeKind::Normal,
            });
        }
        if self.bottleneck_service_time.is_zero() {
            return Err(ConfigurationError::ZeroServiceTime {
                which: ServiceTimeKind::Bottleneck,
            });
        }
        Ok(())
    }

    /// Service time of the station at `index`
    pub fn service_time_at(&self, index: usize) -> Duration {
        if index == self.bottleneck_index {
            self.bottleneck_service_time
        } else {
            self.normal_service_time
        }
    }
}
