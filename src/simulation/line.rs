//! The production line engine
//!
//! A `LineSnapshot` is an immutable view of the whole line at one tick.
//! `advance` never touches `self`; it builds and returns the next snapshot,
//! so adapters can keep the previous one around for animation.

use log::{debug, trace};
use std::collections::BTreeSet;
use std::time::Duration;

use super::config::{ConfigurationError, LineConfig};
use super::ids::WidgetIdGenerator;
use super::occupancy::derive_station_states;
use super::types::{LinePosition, Station, Widget, WidgetId};

/// State of the line after some number of ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSnapshot {
    config: LineConfig,
    stations: Vec<Station>,
    /// Active widgets, ordered from the exit backwards
    widgets: Vec<Widget>,
    ids: WidgetIdGenerator,
    tick: u64,
    clock: Duration,
    exited_total: u64,
}

impl LineSnapshot {
    /// Build the starting state: every station empty and `initial_backlog`
    /// widgets queued in the slots directly upstream of station 0.
    pub fn initialize(config: LineConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let stations: Vec<Station> = (0..config.station_count)
            .map(|index| {
                Station::new(
                    index,
                    index == config.bottleneck_index,
                    config.service_time_at(index),
                )
            })
            .collect();

        let mut ids = WidgetIdGenerator::new();
        let widgets: Vec<Widget> = (1..=config.initial_backlog as LinePosition)
            .map(|slot| Widget::queued(ids.next_id(), -slot))
            .collect();

        debug!(
            "Initialized line: {} stations, bottleneck at {}, {} widgets queued",
            stations.len(),
            config.bottleneck_index,
            widgets.len()
        );

        Ok(Self {
            config,
            stations,
            widgets,
            ids,
            tick: 0,
            clock: Duration::ZERO,
            exited_total: 0,
        })
    }

    /// Run one tick of `tick_duration` and return the resulting snapshot.
    ///
    /// Widgets are resolved strictly from the highest position to the lowest,
    /// over a sorted copy of the current widget list. A widget may move into a
    /// slot only if no widget resolved earlier in this tick ended up there, so a
    /// gap at the front ripples backwards through a queue in a single tick.
    pub fn advance(&self, tick_duration: Duration) -> LineSnapshot {
        let station_count = self.config.station_count as LinePosition;
        let last_station = station_count - 1;
        let bottleneck = self.config.bottleneck_index as LinePosition;

        let mut order = self.widgets.clone();
        order.sort_by(|a, b| b.position.cmp(&a.position));

        let mut resolved: BTreeSet<LinePosition> = BTreeSet::new();
        let mut widgets = Vec::with_capacity(order.len() + 1);

        for mut widget in order {
            widget.elapsed += tick_duration;

            if widget.position == bottleneck
                && widget.elapsed < self.config.bottleneck_service_time
            {
                trace!(
                    "Widget {} processing at bottleneck ({:?}/{:?})",
                    widget.id.0,
                    widget.elapsed,
                    self.config.bottleneck_service_time
                );
            } else if widget.position == last_station
                || !resolved.contains(&(widget.position + 1))
            {
                trace!(
                    "Widget {} moves {} -> {}",
                    widget.id.0,
                    widget.position,
                    widget.position + 1
                );
                widget.position += 1;
                widget.elapsed = Duration::ZERO;
            } else {
                trace!(
                    "Widget {} blocked at {} after {:?}",
                    widget.id.0,
                    widget.position,
                    widget.elapsed
                );
            }

            resolved.insert(widget.position);
            widgets.push(widget);
        }

        let exited = remove_exited(&mut widgets, station_count);
        for id in &exited {
            debug!("Widget {} left the line", id.0);
        }

        let mut ids = self.ids.clone();
        if let Some(id) = replenish(&mut widgets, &mut ids, self.config.target_backlog) {
            debug!("Queued widget {}", id.0);
        }

        let stations = derive_station_states(&self.stations, &widgets);

        let next = LineSnapshot {
            config: self.config.clone(),
            stations,
            widgets,
            ids,
            tick: self.tick + 1,
            clock: self.clock + tick_duration,
            exited_total: self.exited_total + exited.len() as u64,
        };
        debug!(
            "Tick {}: {} active widgets, {} exited so far",
            next.tick,
            next.widgets.len(),
            next.exited_total
        );
        next
    }

    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    /// Stations in line order; always `station_count` long
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Active widgets, nearest the exit first
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn station(&self, index: usize) -> Option<&Station> {
        self.stations.get(index)
    }

    /// The widget standing on station `index`, if any
    pub fn occupant(&self, index: usize) -> Option<&Widget> {
        self.widgets
            .iter()
            .find(|widget| widget.position == index as LinePosition)
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|widget| widget.id == id)
    }

    /// Number of ticks that produced this snapshot
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated time covered so far
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn exited_total(&self) -> u64 {
        self.exited_total
    }

    pub fn created_total(&self) -> u64 {
        self.ids.issued()
    }

    /// Fraction of the whole line `widget` has covered, in `[0, 1]`.
    /// Work done at the current station counts partially.
    pub fn progress(&self, widget: &Widget) -> f64 {
        let station_count = self.config.station_count as f64;
        let service_time = match widget.station_index(self.config.station_count) {
            Some(index) => self.stations[index].service_time,
            None => self.config.normal_service_time,
        };
        let done = (widget.elapsed.as_secs_f64() / service_time.as_secs_f64()).min(1.0);
        ((widget.position as f64 + done) / station_count).clamp(0.0, 1.0)
    }
}

/// Drop widgets that have moved past the last station, returning their ids
fn remove_exited(widgets: &mut Vec<Widget>, station_count: LinePosition) -> Vec<WidgetId> {
    let exited = widgets
        .iter()
        .filter(|widget| widget.position >= station_count)
        .map(|widget| widget.id)
        .collect();
    widgets.retain(|widget| widget.position < station_count);
    exited
}

/// Queue one new widget behind the rearmost one when the line is under target.
/// The new slot is always negative and never shared with another widget.
fn replenish(
    widgets: &mut Vec<Widget>,
    ids: &mut WidgetIdGenerator,
    target_backlog: usize,
) -> Option<WidgetId> {
    if widgets.len() >= target_backlog {
        return None;
    }
    let rearmost = widgets
        .iter()
        .map(|widget| widget.position)
        .min()
        .unwrap_or(0);
    let widget = Widget::queued(ids.next_id(), rearmost.min(0) - 1);
    let id = widget.id;
    widgets.push(widget);
    Some(id)
}
