//! Earliest-stop-per-route scan shared by the arc builders.
//!
//! Transfer, waiting and origin arcs all follow the same rule: starting
//! from a time lower bound at some station, connect to the first stop of
//! each route seen, and never to a route already connected (or to the
//! traveller's own route). The scan keeps going to the end of the station's
//! stops, since a later stop may belong to a route not seen yet.

use std::collections::HashSet;

use super::{Inconsistency, StopVertexRegistry, VertexStop};
use crate::domain::{ScheduleTime, Station, Stop, StopId};
use crate::graph::VertexId;
use crate::schedule::ScheduleData;

/// Look up a stop, treating absence as an inconsistency.
pub(crate) fn stop(schedule: &ScheduleData, id: StopId) -> Result<&Stop, Inconsistency> {
    schedule.stop(id).ok_or(Inconsistency::MissingStop(id))
}

/// Public number of the route serving `stop`.
pub(crate) fn route_number<'s>(
    schedule: &'s ScheduleData,
    stop: &Stop,
) -> Result<&'s str, Inconsistency> {
    let trip = schedule
        .trip(stop.trip())
        .ok_or_else(|| Inconsistency::MissingTrip(stop.trip().clone()))?;
    let route = schedule
        .route(trip.route())
        .ok_or_else(|| Inconsistency::MissingRoute(trip.route().clone()))?;
    Ok(route.number())
}

/// Vertex of a scheduled stop, which must already be registered.
pub(crate) fn vertex_of(registry: &StopVertexRegistry, id: StopId) -> Result<VertexId, Inconsistency> {
    registry
        .vertex_of(VertexStop::Scheduled(id))
        .ok_or(Inconsistency::UnregisteredStop(id))
}

/// First stop of every distinct route at `station` arriving at or after
/// `earliest`, in arrival order. Stops of `skip_route` are never returned.
pub(crate) fn earliest_stop_per_route<'s>(
    schedule: &'s ScheduleData,
    station: &Station,
    earliest: ScheduleTime,
    skip_route: Option<&'s str>,
) -> Result<Vec<(StopId, &'s Stop)>, Inconsistency> {
    let mut used: HashSet<&str> = skip_route.into_iter().collect();
    let mut reached = Vec::new();

    for id in station.stops_from(earliest) {
        let candidate = stop(schedule, id)?;
        if used.insert(route_number(schedule, candidate)?) {
            reached.push((id, candidate));
        }
    }
    Ok(reached)
}
