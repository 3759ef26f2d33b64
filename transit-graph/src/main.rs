use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_graph::domain::Coordinates;
use transit_graph::network::{NetworkConfig, TransitNetwork};
use transit_graph::schedule::ScheduleSnapshot;

const USAGE: &str = "usage: transit-graph <schedule.json> <origin lat,lon> <destination lat,lon> [config.json]";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (schedule_path, origin, destination, config_path) = match args.as_slice() {
        [schedule, origin, destination] => (schedule, origin, destination, None),
        [schedule, origin, destination, config] => (schedule, origin, destination, Some(config)),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(schedule_path, origin, destination, config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Build the network for a schedule snapshot, then attach and detach one
/// query, reporting the graph size at each step.
fn run(
    schedule_path: &str,
    origin: &str,
    destination: &str,
    config_path: Option<&String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let origin: Coordinates = origin.parse()?;
    let destination: Coordinates = destination.parse()?;
    let config = match config_path {
        Some(path) => NetworkConfig::load(path)?,
        None => NetworkConfig::default(),
    };

    let schedule = ScheduleSnapshot::load(schedule_path)?.into_schedule()?;
    let mut network = TransitNetwork::build(&schedule, config)?;
    info!(stats = %network.stats(), "network built");

    let query = network.attach_query_endpoints(&origin, &destination)?;
    info!(
        origin = query.origin,
        destination = query.destination,
        stats = %network.stats(),
        "query attached"
    );

    network.detach_query_endpoints()?;
    info!(stats = %network.stats(), "query detached");
    Ok(())
}
