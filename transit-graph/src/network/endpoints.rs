//! Per-query origin and destination vertices.
//!
//! A query grafts two synthetic vertices onto the static graph: an origin
//! with walking arcs to nearby stations' stops, and a destination reached
//! by walking from nearby stations' stops. Everything grafted is recorded
//! so that detaching restores the graph exactly.

use tracing::{debug, warn};

use super::scan::{earliest_stop_per_route, vertex_of};
use super::{BuildStage, Inconsistency, NetworkError, StopVertexRegistry, VertexStop};
use crate::domain::Coordinates;
use crate::graph::{VertexId, Weight, WeightedDigraph};
use crate::schedule::ScheduleData;
use crate::walkable::WalkingModel;

/// Vertex indices of an attached query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryVertices {
    pub origin: VertexId,
    pub destination: VertexId,
}

/// Everything grafted onto the graph for one query.
#[derive(Debug, Clone)]
struct AttachedQuery {
    vertices: QueryVertices,
    /// Targets of arcs leaving the origin.
    origin_targets: Vec<VertexId>,
    /// Sources of arcs entering the destination.
    destination_sources: Vec<VertexId>,
}

#[derive(Debug, Clone, Default)]
enum LinkerState {
    #[default]
    Detached,
    Attached(AttachedQuery),
}

/// Attaches and detaches the synthetic vertices of one query at a time.
#[derive(Debug, Clone, Default)]
pub struct OriginDestinationLinker {
    state: LinkerState,
}

impl OriginDestinationLinker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, LinkerState::Attached(_))
    }

    /// Synthetic vertices, while attached.
    pub fn vertices(&self) -> Option<QueryVertices> {
        match &self.state {
            LinkerState::Attached(query) => Some(query.vertices),
            LinkerState::Detached => None,
        }
    }

    /// Number of arcs from the origin to station stops (zero when detached).
    pub fn origin_arc_count(&self) -> usize {
        match &self.state {
            LinkerState::Attached(query) => query.origin_targets.len(),
            LinkerState::Detached => 0,
        }
    }

    /// Number of arcs from station stops to the destination (zero when
    /// detached).
    pub fn destination_arc_count(&self) -> usize {
        match &self.state {
            LinkerState::Attached(query) => query.destination_sources.len(),
            LinkerState::Detached => 0,
        }
    }

    /// Add the origin and destination vertices and their walking arcs.
    ///
    /// From the origin: for each walkable station, one arc per distinct
    /// route to its earliest stop reachable after walking there from the
    /// start of the service window, weighted by the time elapsed since
    /// the window start. To the destination: one arc from every stop at
    /// each walkable station, weighted by the walking time.
    ///
    /// On failure everything added so far is removed again.
    pub(crate) fn attach(
        &mut self,
        schedule: &ScheduleData,
        graph: &mut WeightedDigraph,
        registry: &mut StopVertexRegistry,
        walking: &WalkingModel,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> Result<QueryVertices, NetworkError> {
        if self.is_attached() {
            return Err(NetworkError::AlreadyAttached);
        }

        let vertices = QueryVertices {
            origin: registry.vertex_for(VertexStop::Origin),
            destination: registry.vertex_for(VertexStop::Destination),
        };
        let mut query = AttachedQuery {
            vertices,
            origin_targets: Vec::new(),
            destination_sources: Vec::new(),
        };

        let linked = graph
            .resize(registry.len())
            .map_err(Inconsistency::from)
            .and_then(|()| {
                link(
                    &mut query,
                    schedule,
                    graph,
                    registry,
                    walking,
                    origin,
                    destination,
                )
            });
        if let Err(cause) = linked {
            teardown(&query, graph, registry)?;
            return Err(BuildStage::QueryEndpoints.failed(cause));
        }

        debug!(
            origin_arcs = query.origin_targets.len(),
            destination_arcs = query.destination_sources.len(),
            "attached query endpoints"
        );
        self.state = LinkerState::Attached(query);
        Ok(vertices)
    }

    /// Remove everything `attach` added.
    ///
    /// Arcs that are already gone are logged and skipped; the rest of the
    /// teardown still runs.
    pub(crate) fn detach(
        &mut self,
        graph: &mut WeightedDigraph,
        registry: &mut StopVertexRegistry,
    ) -> Result<(), NetworkError> {
        let LinkerState::Attached(query) = std::mem::take(&mut self.state) else {
            return Err(NetworkError::NotAttached);
        };
        teardown(&query, graph, registry)?;
        debug!("detached query endpoints");
        Ok(())
    }
}

fn link(
    query: &mut AttachedQuery,
    schedule: &ScheduleData,
    graph: &mut WeightedDigraph,
    registry: &StopVertexRegistry,
    walking: &WalkingModel,
    origin: &Coordinates,
    destination: &Coordinates,
) -> Result<(), Inconsistency> {
    let start = schedule.window().start();

    for (station, walk_secs) in walking.stations_near(origin, schedule) {
        let earliest = start.saturating_add_secs(walk_secs);
        for (id, stop) in earliest_stop_per_route(schedule, station, earliest, None)? {
            let target = vertex_of(registry, id)?;
            graph.add_arc(query.vertices.origin, target, stop.arrival() - start)?;
            query.origin_targets.push(target);
        }
    }

    for (station, walk_secs) in walking.stations_near(destination, schedule) {
        for id in station.stops() {
            let source = vertex_of(registry, id)?;
            graph.add_arc(source, query.vertices.destination, Weight::from(walk_secs))?;
            query.destination_sources.push(source);
        }
    }

    Ok(())
}

/// Remove the recorded arcs, then the synthetic vertices from the end.
fn teardown(
    query: &AttachedQuery,
    graph: &mut WeightedDigraph,
    registry: &mut StopVertexRegistry,
) -> Result<(), NetworkError> {
    let QueryVertices {
        origin,
        destination,
    } = query.vertices;

    let arcs = query
        .origin_targets
        .iter()
        .map(|&target| (origin, target))
        .chain(query.destination_sources.iter().map(|&source| (source, destination)));
    for (from, to) in arcs {
        if let Err(err) = graph.remove_arc(from, to) {
            warn!(%err, "arc already removed during query teardown");
        }
    }

    for stop in [VertexStop::Destination, VertexStop::Origin] {
        registry
            .unregister(stop)
            .ok_or(NetworkError::SyntheticVertexMisplaced(stop))?;
    }
    graph
        .resize(registry.len())
        .map_err(NetworkError::Teardown)
}
