//! Time-expanded transit network.
//!
//! Every scheduled stop becomes a vertex. Arcs model riding a trip to its
//! next stop, transferring on foot to another station, and waiting at a
//! station for another route; their weights are elapsed seconds. The graph
//! is built once per schedule, then each query attaches a synthetic origin
//! and destination, runs its search, and detaches them again.
//!
//! Construction order matters: trip arcs register every stop, so they come
//! first; transfer and waiting arcs need the complete registry; query
//! endpoints must not be visible to either.

mod config;
mod endpoints;
mod error;
mod registry;
mod scan;
mod transfer_arcs;
mod trip_arcs;
mod waiting_arcs;


use std::fmt;

use tracing::info;

use crate::domain::{Coordinates, Stop, StopId};
use crate::graph::{VertexId, WeightedDigraph};
use crate::schedule::ScheduleData;
use crate::walkable::WalkingModel;

pub use config::{ConfigError, InvalidConfig, NetworkConfig};
pub use endpoints::{OriginDestinationLinker, QueryVertices};
pub use error::{BuildStage, Inconsistency, NetworkError};
pub use registry::{StopVertexRegistry, VertexStop};

/// Vertex and arc counts of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetworkStats {
    pub vertices: usize,
    pub arcs: usize,
    pub trip_arcs: usize,
    pub transfer_arcs: usize,
    pub waiting_arcs: usize,
    /// Arcs from the attached origin (zero when detached).
    pub origin_arcs: usize,
    /// Arcs into the attached destination (zero when detached).
    pub destination_arcs: usize,
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} arcs ({} trip, {} transfer, {} waiting, {} origin, {} destination)",
            self.vertices,
            self.arcs,
            self.trip_arcs,
            self.transfer_arcs,
            self.waiting_arcs,
            self.origin_arcs,
            self.destination_arcs
        )
    }
}

/// The graph for one schedule, plus the vertex mapping and query state.
///
/// Borrows the schedule it was built from: stops stay owned by the
/// repository and are looked up through it.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use transit_graph::domain::*;
/// use transit_graph::network::{NetworkConfig, TransitNetwork};
/// use transit_graph::schedule::{ScheduleBuilder, ServiceException};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let end = ScheduleTime::from_hms(2, 0, 0).unwrap();
/// let window = ServiceWindow::new(ScheduleTime::MIDNIGHT, end).unwrap();
/// let mut builder = ScheduleBuilder::new(date, window);
/// builder.add_route(Route::new(RouteId::from("r"), "1", "One", RouteCategory::Regular));
/// builder.add_service_date(ServiceId::from("s"), date, ServiceException::Added);
/// builder.add_trip(TripId::from("t"), RouteId::from("r"), ServiceId::from("s"), "").unwrap();
/// for (seq, (id, secs)) in [("A", 0), ("B", 300), ("C", 500)].into_iter().enumerate() {
///     let here = Coordinates::new(46.0 + seq as f64 * 0.1, -71.0);
///     builder.add_station(Station::new(StationId::from(id), id, here));
///     let t = ScheduleTime::from_secs(secs);
///     builder
///         .add_stop_time(&TripId::from("t"), &StationId::from(id), t, t, seq as u32)
///         .unwrap();
/// }
/// let schedule = builder.build();
///
/// let mut network = TransitNetwork::build(&schedule, NetworkConfig::default()).unwrap();
/// assert_eq!(network.graph().vertex_count(), 3);
/// assert_eq!(network.graph().arc_count(), 2);
///
/// let query = network
///     .attach_query_endpoints(&Coordinates::new(46.0, -71.0), &Coordinates::new(46.2, -71.0))
///     .unwrap();
/// assert_eq!(network.graph().vertex_count(), 5);
/// assert!(network.graph().has_arc(query.origin, 0));
///
/// network.detach_query_endpoints().unwrap();
/// assert_eq!(network.graph().vertex_count(), 3);
/// assert_eq!(network.graph().arc_count(), 2);
/// ```
#[derive(Debug)]
pub struct TransitNetwork<'s> {
    schedule: &'s ScheduleData,
    graph: WeightedDigraph,
    registry: StopVertexRegistry,
    linker: OriginDestinationLinker,
    walking: WalkingModel,
    config: NetworkConfig,
    trip_arcs: usize,
    transfer_arcs: usize,
    waiting_arcs: usize,
}

impl<'s> TransitNetwork<'s> {
    /// Build the static graph: trip arcs, then transfer arcs, then waiting
    /// arcs. Any inconsistency aborts the build and names the stage.
    ///
    /// The configuration is validated first.
    pub fn build(schedule: &'s ScheduleData, config: NetworkConfig) -> Result<Self, NetworkError> {
        config.validate().map_err(NetworkError::InvalidConfig)?;

        let mut graph = WeightedDigraph::default();
        let mut registry = StopVertexRegistry::new();

        let trip_arcs = trip_arcs::add_trip_arcs(schedule, &mut graph, &mut registry)
            .map_err(|cause| BuildStage::TripArcs.failed(cause))?;
        info!(vertices = registry.len(), arcs = trip_arcs, "trip arcs added");

        let transfer_arcs = transfer_arcs::add_transfer_arcs(schedule, &mut graph, &registry)
            .map_err(|cause| BuildStage::TransferArcs.failed(cause))?;
        info!(arcs = transfer_arcs, "transfer arcs added");

        let waiting_arcs = waiting_arcs::add_waiting_arcs(
            schedule,
            &mut graph,
            &registry,
            config.min_waiting_delay_secs,
        )
        .map_err(|cause| BuildStage::WaitingArcs.failed(cause))?;
        info!(arcs = waiting_arcs, "waiting arcs added");

        Ok(Self {
            schedule,
            graph,
            registry,
            linker: OriginDestinationLinker::new(),
            walking: config.walking_model(),
            config,
            trip_arcs,
            transfer_arcs,
            waiting_arcs,
        })
    }

    /// Replace the walking model, e.g. to supply another distance metric.
    pub fn with_walking_model(mut self, walking: WalkingModel) -> Self {
        self.walking = walking;
        self
    }

    pub fn schedule(&self) -> &'s ScheduleData {
        self.schedule
    }

    pub fn graph(&self) -> &WeightedDigraph {
        &self.graph
    }

    pub fn registry(&self) -> &StopVertexRegistry {
        &self.registry
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn walking_model(&self) -> &WalkingModel {
        &self.walking
    }

    /// What `vertex` stands for.
    pub fn stop_for_vertex(&self, vertex: VertexId) -> Option<VertexStop> {
        self.registry.stop_for(vertex)
    }

    /// The scheduled stop behind `vertex`, if it is not synthetic.
    pub fn scheduled_stop(&self, vertex: VertexId) -> Option<&'s Stop> {
        match self.registry.stop_for(vertex)? {
            VertexStop::Scheduled(id) => self.schedule.stop(id),
            VertexStop::Origin | VertexStop::Destination => None,
        }
    }

    pub fn vertex_for_stop(&self, stop: StopId) -> Option<VertexId> {
        self.registry.vertex_of(VertexStop::Scheduled(stop))
    }

    /// Attach the origin and destination of a query.
    ///
    /// Fails with [`NetworkError::AlreadyAttached`] if a query is attached.
    pub fn attach_query_endpoints(
        &mut self,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> Result<QueryVertices, NetworkError> {
        let vertices = self.linker.attach(
            self.schedule,
            &mut self.graph,
            &mut self.registry,
            &self.walking,
            origin,
            destination,
        )?;
        info!(
            %origin,
            %destination,
            origin_arcs = self.linker.origin_arc_count(),
            destination_arcs = self.linker.destination_arc_count(),
            "query attached"
        );
        Ok(vertices)
    }

    /// Detach the current query, restoring the static graph.
    ///
    /// Fails with [`NetworkError::NotAttached`] if no query is attached.
    pub fn detach_query_endpoints(&mut self) -> Result<(), NetworkError> {
        self.linker.detach(&mut self.graph, &mut self.registry)
    }

    /// Synthetic vertices of the attached query.
    pub fn query_vertices(&self) -> Option<QueryVertices> {
        self.linker.vertices()
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            vertices: self.graph.vertex_count(),
            arcs: self.graph.arc_count(),
            trip_arcs: self.trip_arcs,
            transfer_arcs: self.transfer_arcs,
            waiting_arcs: self.waiting_arcs,
            origin_arcs: self.linker.origin_arc_count(),
            destination_arcs: self.linker.destination_arc_count(),
        }
    }
}
