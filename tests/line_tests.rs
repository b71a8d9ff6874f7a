//! Engine behaviour tests
//!
//! Runs the default line and small custom lines and checks how widgets move.

use std::collections::HashSet;
use std::time::Duration;

use bottleneck_sim::simulation::{
    LineConfig, LineSnapshot, OccupancyState, WidgetId, DEFAULT_NORMAL_SERVICE_TIME,
};

const TICK: Duration = DEFAULT_NORMAL_SERVICE_TIME;

fn default_line() -> LineSnapshot {
    LineSnapshot::initialize(LineConfig::default()).expect("default config is valid")
}

/// Snapshots for ticks 0..=ticks
fn run(initial: LineSnapshot, ticks: usize) -> Vec<LineSnapshot> {
    let mut history = vec![initial];
    for _ in 0..ticks {
        let next = history.last().unwrap().advance(TICK);
        history.push(next);
    }
    history
}

fn occupancy(snapshot: &LineSnapshot) -> Vec<OccupancyState> {
    snapshot.stations().iter().map(|s| s.occupancy).collect()
}

#[test]
fn test_initialize_queues_backlog_upstream() {
    let line = default_line();

    assert_eq!(line.tick(), 0);
    assert_eq!(line.stations().len(), 8);
    assert!(line
        .stations()
        .iter()
        .all(|s| s.occupancy == OccupancyState::Empty));

    let bottlenecks: Vec<usize> = line
        .stations()
        .iter()
        .filter(|s| s.is_bottleneck)
        .map(|s| s.index)
        .collect();
    assert_eq!(bottlenecks, vec![3]);
    assert_eq!(line.stations()[3].service_time, Duration::from_millis(5000));
    assert_eq!(line.stations()[2].service_time, Duration::from_millis(1000));

    let mut positions: Vec<i64> = line.widgets().iter().map(|w| w.position).collect();
    positions.sort();
    assert_eq!(positions, vec![-6, -5, -4, -3, -2, -1]);
    assert!(line.widgets().iter().all(|w| w.elapsed == Duration::ZERO));

    let ids: HashSet<WidgetId> = line.widgets().iter().map(|w| w.id).collect();
    assert_eq!(ids.len(), 6);
}

#[test]
fn test_first_tick_moves_every_queued_widget_one_step() {
    let line = default_line();
    let next = line.advance(TICK);

    assert_eq!(next.widgets().len(), 6);
    for before in line.widgets() {
        let after = next.widget(before.id).expect("widget still active");
        assert_eq!(after.position, before.position + 1);
        assert_eq!(after.elapsed, Duration::ZERO);
    }
    // Only the widget that was at -1 reached a station
    assert_eq!(
        occupancy(&next),
        vec![
            OccupancyState::Working,
            OccupancyState::Empty,
            OccupancyState::Empty,
            OccupancyState::Empty,
            OccupancyState::Empty,
            OccupancyState::Empty,
            OccupancyState::Empty,
            OccupancyState::Empty,
        ]
    );
}

#[test]
fn test_advance_leaves_previous_snapshot_untouched() {
    let line = default_line();
    let copy = line.clone();
    let _ = line.advance(TICK);
    let _ = line.advance(TICK);
    assert_eq!(line, copy);
}

#[test]
fn test_widget_dwells_five_ticks_at_bottleneck() {
    let history = run(default_line(), 20);
    let lead = history[0].widgets()[0].id;

    let ticks_at_bottleneck: Vec<u64> = history
        .iter()
        .filter(|s| s.widget(lead).map(|w| w.position) == Some(3))
        .map(|s| s.tick())
        .collect();
    assert_eq!(ticks_at_bottleneck, vec![4, 5, 6, 7, 8]);

    // Downstream is free, so the bottleneck never reports blocked while it works
    for tick in 4..=8 {
        assert_eq!(history[tick].stations()[3].occupancy, OccupancyState::Working);
    }
    assert_eq!(history[9].widget(lead).map(|w| w.position), Some(4));
}

#[test]
fn test_upstream_blocks_and_downstream_starves() {
    let history = run(default_line(), 6);
    let snapshot = &history[5];

    assert_eq!(
        occupancy(snapshot),
        vec![
            OccupancyState::Blocked,
            OccupancyState::Blocked,
            OccupancyState::Blocked,
            OccupancyState::Working,
            OccupancyState::Empty,
            OccupancyState::Empty,
            OccupancyState::Empty,
            OccupancyState::Empty,
        ]
    );

    let blocked = snapshot.occupant(2).expect("station 2 occupied");
    assert_eq!(blocked.elapsed, Duration::from_millis(1000));
}

#[test]
fn test_gap_ripples_back_through_queue_in_one_tick() {
    let history = run(default_line(), 9);
    let before = &history[8];
    let after = &history[9];

    for widget in before.widgets() {
        let moved = after.widget(widget.id).expect("nobody exits yet");
        assert_eq!(moved.position, widget.position + 1, "widget {:?}", widget.id);
        assert_eq!(moved.elapsed, Duration::ZERO);
    }
}

#[test]
fn test_bottleneck_release_requires_full_service_time() {
    let config = LineConfig {
        station_count: 4,
        bottleneck_index: 1,
        normal_service_time: TICK,
        bottleneck_service_time: Duration::from_millis(2000),
        initial_backlog: 3,
        target_backlog: 3,
    };
    let history = run(LineSnapshot::initialize(config).unwrap(), 30);

    for pair in history.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        for widget in prev.widgets().iter().filter(|w| w.position == 1) {
            if let Some(after) = next.widget(widget.id) {
                if after.position != widget.position {
                    assert!(widget.elapsed + TICK >= Duration::from_millis(2000));
                }
            }
        }
    }
}

#[test]
fn test_bottleneck_gate_holds_even_when_next_station_free() {
    let config = LineConfig {
        station_count: 3,
        bottleneck_index: 2,
        normal_service_time: TICK,
        bottleneck_service_time: Duration::from_millis(3000),
        initial_backlog: 1,
        target_backlog: 1,
    };
    let history = run(LineSnapshot::initialize(config).unwrap(), 8);
    let id = history[0].widgets()[0].id;

    let positions: Vec<Option<i64>> = history
        .iter()
        .map(|s| s.widget(id).map(|w| w.position))
        .collect();
    // -1 -> 0 -> 1 -> 2, held for 3 ticks in total, then exits
    assert_eq!(
        positions[..7],
        [Some(-1), Some(0), Some(1), Some(2), Some(2), Some(2), None]
    );
    assert_eq!(history[5].stations()[2].occupancy, OccupancyState::Working);
}

#[test]
fn test_widget_at_last_station_always_exits() {
    let history = run(default_line(), 60);

    for pair in history.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if let Some(last) = prev.occupant(7) {
            assert!(next.widget(last.id).is_none(), "tick {}", next.tick());
        }
    }
    assert!(history.last().unwrap().exited_total() > 0);
}

#[test]
fn test_lead_widget_exit_triggers_replenishment() {
    let history = run(default_line(), 13);
    let lead = history[0].widgets()[0].id;

    assert_eq!(history[12].widget(lead).map(|w| w.position), Some(7));
    let after_exit = &history[13];
    assert!(after_exit.widget(lead).is_none());
    assert_eq!(after_exit.exited_total(), 1);
    assert_eq!(after_exit.created_total(), 7);
    assert_eq!(after_exit.widgets().len(), 6);

    let newcomer = after_exit.widget(WidgetId(6)).expect("replenished widget");
    assert!(newcomer.position < 0);
    assert_eq!(newcomer.elapsed, Duration::ZERO);
}

#[test]
fn test_replenishment_adds_one_widget_per_tick_up_to_target() {
    let config = LineConfig {
        initial_backlog: 0,
        target_backlog: 3,
        ..LineConfig::default()
    };
    let history = run(LineSnapshot::initialize(config).unwrap(), 5);

    let counts: Vec<usize> = history.iter().map(|s| s.widgets().len()).collect();
    assert_eq!(counts, vec![0, 1, 2, 3, 3, 3]);
}

#[test]
fn test_target_backlog_independent_of_initial_backlog() {
    let config = LineConfig {
        initial_backlog: 2,
        target_backlog: 8,
        ..LineConfig::default()
    };
    let history = run(LineSnapshot::initialize(config).unwrap(), 40);
    assert!(history[40].widgets().len() >= 8);
}

#[test]
fn test_invariants_hold_over_long_run() {
    let config = LineConfig::default();
    let station_count = config.station_count as i64;
    let target = config.target_backlog;
    let history = run(LineSnapshot::initialize(config).unwrap(), 200);

    for snapshot in &history {
        // Mutual exclusion, queue slots included
        let positions: HashSet<i64> = snapshot.widgets().iter().map(|w| w.position).collect();
        assert_eq!(positions.len(), snapshot.widgets().len());

        // Exited widgets never linger
        assert!(snapshot.widgets().iter().all(|w| w.position < station_count));

        // Backlog maintenance
        assert!(snapshot.widgets().len() >= target);

        // Occupancy is a pure function of widget positions
        for station in snapshot.stations() {
            let expected = match snapshot.occupant(station.index) {
                None => OccupancyState::Empty,
                Some(w) if w.elapsed >= station.service_time => OccupancyState::Blocked,
                Some(_) => OccupancyState::Working,
            };
            assert_eq!(station.occupancy, expected, "tick {}", snapshot.tick());
        }
    }

    for pair in history.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        for widget in prev.widgets() {
            let Some(after) = next.widget(widget.id) else {
                continue;
            };
            if after.position == widget.position {
                assert_eq!(after.elapsed, widget.elapsed + TICK);
            } else {
                assert_eq!(after.position, widget.position + 1);
                assert_eq!(after.elapsed, Duration::ZERO);
            }
            if widget.position == 3 && after.position != 3 {
                assert!(widget.elapsed + TICK >= Duration::from_millis(5000));
            }
        }
    }
}

#[test]
fn test_widget_ids_are_unique_across_run() {
    let history = run(default_line(), 100);
    let last = history.last().unwrap();

    let mut seen = HashSet::new();
    for snapshot in &history {
        for widget in snapshot.widgets() {
            seen.insert(widget.id);
        }
    }
    assert_eq!(seen.len() as u64, last.created_total());
    assert_eq!(
        last.created_total(),
        last.exited_total() + last.widgets().len() as u64
    );
}

#[test]
fn test_separate_lines_number_widgets_independently() {
    let a = run(default_line(), 30);
    let b = default_line();

    assert_eq!(b.widgets()[0].id, WidgetId(0));
    assert_eq!(a[0].widgets()[0].id, WidgetId(0));
    assert!(a[30].created_total() > b.created_total());
}

#[test]
fn test_progress_counts_partial_work() {
    let history = run(default_line(), 6);
    let snapshot = &history[6];

    let at_bottleneck = snapshot.occupant(3).unwrap();
    assert_eq!(at_bottleneck.elapsed, Duration::from_millis(2000));
    let progress = snapshot.progress(at_bottleneck);
    assert!((progress - 3.4 / 8.0).abs() < 1e-9, "progress {}", progress);

    let queued = snapshot.widgets().iter().find(|w| w.is_queued()).unwrap();
    assert_eq!(snapshot.progress(queued), 0.0);
}

#[test]
fn test_station_labels() {
    let line = default_line();
    assert_eq!(line.stations()[0].service_label(), "1 second");
    assert_eq!(line.stations()[3].service_label(), "5 seconds");
    assert_eq!(line.stations()[3].service_seconds(), 5);
    assert_eq!(OccupancyState::Blocked.legend_label(), "blocked by bottleneck");
}
