//! Arcs for waiting at a station to change route.

use tracing::trace;

use super::scan::{earliest_stop_per_route, route_number, stop, vertex_of};
use super::{Inconsistency, StopVertexRegistry};
use crate::graph::WeightedDigraph;
use crate::schedule::ScheduleData;

/// At every station that is not the origin of a transfer rule, connect
/// each stop to the earliest later stop of each other route there, no
/// sooner than `min_delay_secs` after arriving.
///
/// Weights run forward in time: later stop minus earlier stop.
/// Returns the number of arcs added.
pub(crate) fn add_waiting_arcs(
    schedule: &ScheduleData,
    graph: &mut WeightedDigraph,
    registry: &StopVertexRegistry,
    min_delay_secs: u32,
) -> Result<usize, Inconsistency> {
    let mut added = 0;

    for station in schedule
        .stations()
        .filter(|station| !schedule.is_transfer_station(station.id()))
    {
        let before = added;
        for origin_id in station.stops() {
            let origin = stop(schedule, origin_id)?;
            let origin_vertex = vertex_of(registry, origin_id)?;
            let own_route = route_number(schedule, origin)?;
            let earliest = origin.arrival().saturating_add_secs(min_delay_secs);

            for (target_id, target) in
                earliest_stop_per_route(schedule, station, earliest, Some(own_route))?
            {
                let target_vertex = vertex_of(registry, target_id)?;
                graph.add_arc(
                    origin_vertex,
                    target_vertex,
                    target.arrival() - origin.arrival(),
                )?;
                added += 1;
            }
        }

        if added > before {
            trace!(station = %station.id(), arcs = added - before, "waiting arcs");
        }
    }

    Ok(added)
}
