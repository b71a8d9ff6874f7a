//! Plain-text rendering of the line for headless runs

use anyhow::Result;
use std::io::Write;

use crate::simulation::{LineSnapshot, LineStats, OccupancyState, PresentationAdapter};

/// Glyph drawn in a station's box for each state
fn state_glyph(state: OccupancyState) -> char {
    match state {
        OccupancyState::Empty => ' ',
        OccupancyState::Working => '+',
        OccupancyState::Blocked => '#',
    }
}

/// Writes a table of stations and the queue after every tick
pub struct TextAdapter<W: Write> {
    out: W,
    legend_written: bool,
}

impl<W: Write> TextAdapter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            legend_written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_legend(&mut self) -> Result<()> {
        writeln!(self.out, "Legend:")?;
        for state in OccupancyState::ALL {
            writeln!(self.out, "  [{}] {}", state_glyph(state), state.legend_label())?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> PresentationAdapter for TextAdapter<W> {
    fn present(&mut self, snapshot: &LineSnapshot) -> Result<()> {
        if !self.legend_written {
            self.write_legend()?;
            self.legend_written = true;
        }

        writeln!(
            self.out,
            "--- Tick {} ({:.1}s simulated) ---",
            snapshot.tick(),
            snapshot.clock().as_secs_f64()
        )?;

        for station in snapshot.stations() {
            let occupant = match snapshot.occupant(station.index) {
                Some(widget) => format!(
                    "w{} {:>3.0}%",
                    widget.id.0,
                    snapshot.progress(widget) * 100.0
                ),
                None => "-".to_string(),
            };
            writeln!(
                self.out,
                "  {:>2}{} [{}] {:<10} {:<9} {}",
                station.index,
                if station.is_bottleneck { '*' } else { ' ' },
                state_glyph(station.occupancy),
                occupant,
                station.occupancy.as_str(),
                station.service_label()
            )?;
        }

        let queued: Vec<String> = snapshot
            .widgets()
            .iter()
            .filter(|widget| widget.is_queued())
            .map(|widget| format!("w{}@{}", widget.id.0, widget.position))
            .collect();
        writeln!(self.out, "  queued: {}", queued.join(" "))?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self, stats: &LineStats) -> Result<()> {
        writeln!(self.out, "=== Line Summary ===")?;
        writeln!(
            self.out,
            "Ticks: {}, Simulated time: {:.1}s",
            stats.ticks,
            stats.simulated_time.as_secs_f64()
        )?;
        writeln!(
            self.out,
            "Widgets: {} created, {} exited, {} active",
            stats.widgets_created, stats.widgets_exited, stats.active_widgets
        )?;
        writeln!(self.out, "Throughput: {:.3} widgets/s", stats.throughput())?;
        self.out.flush()?;
        Ok(())
    }
}
