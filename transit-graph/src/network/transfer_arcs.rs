//! Arcs between stations joined by a transfer rule.

use tracing::trace;

use super::scan::{earliest_stop_per_route, route_number, stop, vertex_of};
use super::{Inconsistency, StopVertexRegistry};
use crate::graph::WeightedDigraph;
use crate::schedule::ScheduleData;

/// For each transfer rule, connect every stop at the origin station to the
/// earliest stop of each other route at the destination station reachable
/// after the minimum transfer delay.
///
/// Returns the number of arcs added.
pub(crate) fn add_transfer_arcs(
    schedule: &ScheduleData,
    graph: &mut WeightedDigraph,
    registry: &StopVertexRegistry,
) -> Result<usize, Inconsistency> {
    let mut added = 0;

    for rule in schedule.transfers() {
        let from = schedule
            .station(rule.from())
            .ok_or_else(|| Inconsistency::MissingStation(rule.from().clone()))?;
        let to = schedule
            .station(rule.to())
            .ok_or_else(|| Inconsistency::MissingStation(rule.to().clone()))?;

        let before = added;
        for origin_id in from.stops() {
            let origin = stop(schedule, origin_id)?;
            let origin_vertex = vertex_of(registry, origin_id)?;
            let own_route = route_number(schedule, origin)?;
            let earliest = origin.arrival().saturating_add_secs(rule.min_delay_secs());

            for (target_id, target) in
                earliest_stop_per_route(schedule, to, earliest, Some(own_route))?
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

        trace!(from = %rule.from(), to = %rule.to(), arcs = added - before, "transfer rule");
    }

    Ok(added)
}
