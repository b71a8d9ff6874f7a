//! JSON Lines output: one document per snapshot
//!
//! Durations are written as whole milliseconds.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::simulation::{
    LinePosition, LineSnapshot, LineStats, OccupancyState, PresentationAdapter, WidgetId,
};

#[derive(Debug, Serialize)]
struct StationView {
    index: usize,
    is_bottleneck: bool,
    service_time_ms: u128,
    occupancy: OccupancyState,
}

#[derive(Debug, Serialize)]
struct WidgetView {
    id: WidgetId,
    position: LinePosition,
    elapsed_ms: u128,
    progress: f64,
}

#[derive(Debug, Serialize)]
struct SnapshotView {
    tick: u64,
    clock_ms: u128,
    stations: Vec<StationView>,
    widgets: Vec<WidgetView>,
}

impl SnapshotView {
    fn from_snapshot(snapshot: &LineSnapshot) -> Self {
        Self {
            tick: snapshot.tick(),
            clock_ms: snapshot.clock().as_millis(),
            stations: snapshot
                .stations()
                .iter()
                .map(|station| StationView {
                    index: station.index,
                    is_bottleneck: station.is_bottleneck,
                    service_time_ms: station.service_time.as_millis(),
                    occupancy: station.occupancy,
                })
                .collect(),
            widgets: snapshot
                .widgets()
                .iter()
                .map(|widget| WidgetView {
                    id: widget.id,
                    position: widget.position,
                    elapsed_ms: widget.elapsed.as_millis(),
                    progress: snapshot.progress(widget),
                })
                .collect(),
        }
    }
}

/// Streams snapshots as newline-delimited JSON
pub struct JsonLinesAdapter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesAdapter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PresentationAdapter for JsonLinesAdapter<W> {
    fn present(&mut self, snapshot: &LineSnapshot) -> Result<()> {
        let view = SnapshotView::from_snapshot(snapshot);
        serde_json::to_writer(&mut self.out, &view)
            .with_context(|| format!("Failed to serialize tick {}", snapshot.tick()))?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self, _stats: &LineStats) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
