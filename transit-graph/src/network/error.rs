//! Network construction and query errors.

use std::fmt;

use super::{InvalidConfig, VertexStop};
use crate::domain::{RouteId, StationId, StopId, TripId};
use crate::graph::GraphError;

/// Construction stage that raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    TripArcs,
    TransferArcs,
    WaitingArcs,
    QueryEndpoints,
}

impl BuildStage {
    /// Tag an inconsistency with this stage.
    pub(crate) fn failed(self, cause: Inconsistency) -> NetworkError {
        NetworkError::Construction { stage: self, cause }
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::TripArcs => "trip-arc construction",
            BuildStage::TransferArcs => "transfer-arc construction",
            BuildStage::WaitingArcs => "waiting-arc construction",
            BuildStage::QueryEndpoints => "query endpoint attachment",
        };
        f.write_str(name)
    }
}

/// Something the schedule or the graph did not agree with while arcs were
/// being added.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Inconsistency {
    #[error("station {0} is not in the schedule")]
    MissingStation(StationId),

    #[error("trip {0} is not in the schedule")]
    MissingTrip(TripId),

    #[error("route {0} is not in the schedule")]
    MissingRoute(RouteId),

    #[error("stop {0} is not in the schedule")]
    MissingStop(StopId),

    #[error("stop {0} was registered twice")]
    StopRegisteredTwice(StopId),

    #[error("stop {0} has no vertex")]
    UnregisteredStop(StopId),

    /// Consecutive stops of a trip go back in time
    #[error("trip {trip} arrives at stop {to} before stop {from}")]
    TimeRegression { trip: TripId, from: StopId, to: StopId },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors surfaced by [`TransitNetwork`](super::TransitNetwork).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// The configuration failed validation
    #[error("network config rejected: {0}")]
    InvalidConfig(#[source] InvalidConfig),

    /// A construction stage hit an inconsistency; the graph is unusable
    #[error("{stage} failed: {cause}")]
    Construction {
        stage: BuildStage,
        #[source]
        cause: Inconsistency,
    },

    /// `attach` while a query is attached
    #[error("query endpoints are already attached")]
    AlreadyAttached,

    /// `detach` while no query is attached
    #[error("query endpoints are not attached")]
    NotAttached,

    /// A synthetic vertex was not at the end of the vertex range
    #[error("synthetic {0:?} vertex is not the last vertex")]
    SyntheticVertexMisplaced(VertexStop),

    /// Stray arcs kept the graph from shrinking back
    #[error("query teardown failed: {0}")]
    Teardown(#[source] GraphError),
}

impl NetworkError {
    /// The stage that failed, for construction errors.
    pub fn stage(&self) -> Option<BuildStage> {
        match self {
            NetworkError::Construction { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The call was made in the wrong attach/detach state.
    pub fn is_state_error(&self) -> bool {
        matches!(self, NetworkError::AlreadyAttached | NetworkError::NotAttached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_error_names_stage() {
        let err = BuildStage::TripArcs.failed(Inconsistency::MissingTrip(TripId::from("t9")));
        assert_eq!(
            err.to_string(),
            "trip-arc construction failed: trip t9 is not in the schedule"
        );
        assert_eq!(err.stage(), Some(BuildStage::TripArcs));
        assert!(!err.is_state_error());
    }

    #[test]
    fn graph_errors_pass_through() {
        let cause: Inconsistency = GraphError::DuplicateArc { from: 1, to: 2 }.into();
        let err = BuildStage::TransferArcs.failed(cause);
        assert_eq!(
            err.to_string(),
            "transfer-arc construction failed: arc 1 -> 2 already exists"
        );
    }

    #[test]
    fn state_errors() {
        assert!(NetworkError::AlreadyAttached.is_state_error());
        assert!(NetworkError::NotAttached.is_state_error());
        assert_eq!(NetworkError::NotAttached.stage(), None);
    }
}
