//! Bidirectional stop ↔ vertex mapping.

use std::collections::HashMap;

use crate::domain::StopId;
use crate::graph::VertexId;

/// What a vertex stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexStop {
    /// A scheduled stop from the repository.
    Scheduled(StopId),
    /// The synthetic origin of the attached query.
    Origin,
    /// The synthetic destination of the attached query.
    Destination,
}

/// One vertex per stop, numbered densely in registration order.
///
/// Vertices are only ever appended at the end and removed from the end, so
/// vertex indices stay `0..len()` and line up with the graph's vertex range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopVertexRegistry {
    stops: Vec<VertexStop>,
    vertices: HashMap<VertexStop, VertexId>,
}

impl StopVertexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered vertices.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Vertex of `stop`, registering it as the next vertex if needed.
    pub fn vertex_for(&mut self, stop: VertexStop) -> VertexId {
        if let Some(&vertex) = self.vertices.get(&stop) {
            return vertex;
        }
        let vertex = self.stops.len();
        self.stops.push(stop);
        self.vertices.insert(stop, vertex);
        vertex
    }

    /// Vertex of `stop`, if registered.
    pub fn vertex_of(&self, stop: VertexStop) -> Option<VertexId> {
        self.vertices.get(&stop).copied()
    }

    /// Stop behind `vertex`.
    pub fn stop_for(&self, vertex: VertexId) -> Option<VertexStop> {
        self.stops.get(vertex).copied()
    }

    pub fn contains(&self, stop: VertexStop) -> bool {
        self.vertices.contains_key(&stop)
    }

    /// Remove `stop` if it is the last registered vertex, returning the
    /// freed index. Anything else is left untouched and yields `None`.
    ///
    /// Callers must already have removed every arc incident to the vertex.
    pub fn unregister(&mut self, stop: VertexStop) -> Option<VertexId> {
        if self.stops.last() != Some(&stop) {
            return None;
        }
        self.stops.pop();
        self.vertices.remove(&stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled(i: usize) -> VertexStop {
        VertexStop::Scheduled(StopId(i))
    }

    #[test]
    fn registration_is_dense_and_idempotent() {
        let mut reg = StopVertexRegistry::new();
        assert!(reg.is_empty());

        assert_eq!(reg.vertex_for(scheduled(7)), 0);
        assert_eq!(reg.vertex_for(scheduled(3)), 1);
        assert_eq!(reg.vertex_for(scheduled(7)), 0);
        assert_eq!(reg.len(), 2);

        assert_eq!(reg.stop_for(1), Some(scheduled(3)));
        assert_eq!(reg.vertex_of(scheduled(3)), Some(1));
        assert_eq!(reg.vertex_of(scheduled(4)), None);
        assert_eq!(reg.stop_for(2), None);
    }

    #[test]
    fn synthetic_stops_are_distinct() {
        let mut reg = StopVertexRegistry::new();
        reg.vertex_for(scheduled(0));
        let origin = reg.vertex_for(VertexStop::Origin);
        let destination = reg.vertex_for(VertexStop::Destination);

        assert_eq!((origin, destination), (1, 2));
        assert!(reg.contains(VertexStop::Origin));
        assert_eq!(reg.stop_for(2), Some(VertexStop::Destination));
    }

    #[test]
    fn unregister_only_from_the_end() {
        let mut reg = StopVertexRegistry::new();
        reg.vertex_for(scheduled(0));
        reg.vertex_for(VertexStop::Origin);
        reg.vertex_for(VertexStop::Destination);
        let before = reg.clone();

        // Not last
        assert_eq!(reg.unregister(VertexStop::Origin), None);
        assert_eq!(reg, before);

        assert_eq!(reg.unregister(VertexStop::Destination), Some(2));
        assert_eq!(reg.unregister(VertexStop::Origin), Some(1));
        assert_eq!(reg.len(), 1);
        assert!(!reg.contains(VertexStop::Origin));
        assert_eq!(reg.unregister(VertexStop::Origin), None);
    }

    #[test]
    fn register_after_unregister_reuses_index() {
        let mut reg = StopVertexRegistry::new();
        reg.vertex_for(scheduled(0));
        reg.vertex_for(VertexStop::Origin);
        reg.unregister(VertexStop::Origin);

        assert_eq!(reg.vertex_for(VertexStop::Destination), 1);
    }
}
