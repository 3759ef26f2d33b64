//! Arcs along each trip.

use tracing::trace;

use super::scan::stop;
use super::{Inconsistency, StopVertexRegistry, VertexStop};
use crate::domain::{Stop, StopId};
use crate::graph::{VertexId, WeightedDigraph};
use crate::schedule::ScheduleData;

/// Register every stop as a vertex, trip by trip, and chain consecutive
/// stops of a trip with an arc weighted by the arrival-time difference.
///
/// Returns the number of arcs added.
pub(crate) fn add_trip_arcs(
    schedule: &ScheduleData,
    graph: &mut WeightedDigraph,
    registry: &mut StopVertexRegistry,
) -> Result<usize, Inconsistency> {
    let mut added = 0;

    for trip in schedule.trips() {
        let mut previous: Option<(StopId, &Stop, VertexId)> = None;

        for id in trip.stops() {
            let current = stop(schedule, id)?;
            let vertex = register_new(registry, id)?;
            graph.resize(registry.len())?;

            if let Some((prev_id, prev, prev_vertex)) = previous {
                let weight = current.arrival() - prev.arrival();
                if weight < 0 {
                    return Err(Inconsistency::TimeRegression {
                        trip: trip.id().clone(),
                        from: prev_id,
                        to: id,
                    });
                }
                graph.add_arc(prev_vertex, vertex, weight)?;
                added += 1;
            }
            previous = Some((id, current, vertex));
        }

        trace!(trip = %trip.id(), stops = trip.len(), "chained trip");
    }

    Ok(added)
}

/// Register a stop that must not have been seen before.
fn register_new(registry: &mut StopVertexRegistry, id: StopId) -> Result<VertexId, Inconsistency> {
    let key = VertexStop::Scheduled(id);
    if registry.contains(key) {
        return Err(Inconsistency::StopRegisteredTwice(id));
    }
    Ok(registry.vertex_for(key))
}
