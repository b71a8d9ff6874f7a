use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::time::Duration;

use bottleneck_sim::presentation::{JsonLinesAdapter, TextAdapter};
use bottleneck_sim::simulation::{
    LineConfig, LineSnapshot, PresentationAdapter, TickDriver, DEFAULT_BOTTLENECK_INDEX,
    DEFAULT_INITIAL_BACKLOG, DEFAULT_STATION_COUNT, DEFAULT_TARGET_BACKLOG,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "bottleneck_sim")]
#[command(about = "Production line simulation showing how a slow station backs up the line")]
struct Cli {
    /// Number of stations on the line
    #[arg(long, default_value_t = DEFAULT_STATION_COUNT)]
    stations: usize,

    /// Index of the slow station
    #[arg(long, default_value_t = DEFAULT_BOTTLENECK_INDEX)]
    bottleneck: usize,

    /// Service time of a normal station in milliseconds (also the tick interval)
    #[arg(long, default_value = "1000")]
    normal_ms: u64,

    /// Service time of the bottleneck station in milliseconds
    #[arg(long, default_value = "5000")]
    bottleneck_ms: u64,

    /// Widgets queued at start
    #[arg(long, default_value_t = DEFAULT_INITIAL_BACKLOG)]
    initial_backlog: usize,

    /// Active widget count kept up by replenishment
    #[arg(long, default_value_t = DEFAULT_TARGET_BACKLOG)]
    target_backlog: usize,

    /// Number of ticks to run
    #[arg(long, default_value = "60")]
    ticks: u64,

    /// Run ticks back to back instead of once per interval
    #[arg(long)]
    no_wait: bool,

    /// Output format for snapshots
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl Cli {
    fn line_config(&self) -> LineConfig {
        LineConfig {
            station_count: self.stations,
            bottleneck_index: self.bottleneck,
            normal_service_time: Duration::from_millis(self.normal_ms),
            bottleneck_service_time: Duration::from_millis(self.bottleneck_ms),
            initial_backlog: self.initial_backlog,
            target_backlog: self.target_backlog,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,bottleneck_sim=info"),
    )
    .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.line_config();
    info!(
        "Line: {} stations, bottleneck at {} ({:?} vs {:?}), backlog {} initial / {} target",
        config.station_count,
        config.bottleneck_index,
        config.bottleneck_service_time,
        config.normal_service_time,
        config.initial_backlog,
        config.target_backlog
    );

    let initial = LineSnapshot::initialize(config).context("Invalid line configuration")?;
    let driver = TickDriver::for_line(&initial, !cli.no_wait);

    let stdout = std::io::stdout().lock();
    let mut adapter: Box<dyn PresentationAdapter> = match cli.format {
        OutputFormat::Text => Box::new(TextAdapter::new(stdout)),
        OutputFormat::Json => Box::new(JsonLinesAdapter::new(stdout)),
    };

    driver.run(initial, cli.ticks, adapter.as_mut())?;
    Ok(())
}
