//! Station state derivation
//!
//! Occupancy is recomputed from widget positions every tick and never patched.

use super::types::{OccupancyState, Station, Widget};

/// Classify one station given the widget standing on it (if any)
pub fn classify(station: &Station, occupant: Option<&Widget>) -> OccupancyState {
    match occupant {
        None => OccupancyState::Empty,
        Some(widget) if widget.elapsed >= station.service_time => OccupancyState::Blocked,
        Some(_) => OccupancyState::Working,
    }
}

/// Return a copy of `stations` with every occupancy state derived from `widgets`
pub fn derive_station_states(stations: &[Station], widgets: &[Widget]) -> Vec<Station> {
    let station_count = stations.len();
    let mut occupants: Vec<Option<&Widget>> = vec![None; station_count];
    for widget in widgets {
        if let Some(index) = widget.station_index(station_count) {
            occupants[index] = Some(widget);
        }
    }

    stations
        .iter()
        .zip(occupants)
        .map(|(station, occupant)| Station {
            occupancy: classify(station, occupant),
            ..station.clone()
        })
        .collect()
}
