//! Trips: one vehicle run along a route.

use std::collections::BTreeMap;

use super::{RouteId, ServiceId, StopId, TripId};

/// An ordered run of a vehicle through a sequence of stops.
///
/// Stops are keyed by their sequence number, so iteration always follows
/// the order the vehicle visits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    id: TripId,
    route: RouteId,
    service: ServiceId,
    headsign: String,
    stops: BTreeMap<u32, StopId>,
}

impl Trip {
    pub fn new(id: TripId, route: RouteId, service: ServiceId, headsign: impl Into<String>) -> Self {
        Self {
            id,
            route,
            service,
            headsign: headsign.into(),
            stops: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &TripId {
        &self.id
    }

    pub fn route(&self) -> &RouteId {
        &self.route
    }

    pub fn service(&self) -> &ServiceId {
        &self.service
    }

    pub fn headsign(&self) -> &str {
        &self.headsign
    }

    /// Stops in sequence order.
    pub fn stops(&self) -> impl Iterator<Item = StopId> + '_ {
        self.stops.values().copied()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub(crate) fn has_sequence(&self, sequence: u32) -> bool {
        self.stops.contains_key(&sequence)
    }

    pub(crate) fn add_stop(&mut self, sequence: u32, stop: StopId) {
        self.stops.insert(sequence, stop);
    }
}
