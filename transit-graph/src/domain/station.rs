//! Stations and their time-ordered stops.

use std::collections::BTreeSet;
use std::ops::Bound;

use super::{Coordinates, ScheduleTime, StationId, StopId};

/// A physical place where vehicles call.
///
/// A station indexes its stops by arrival time so that the question "what
/// is the first stop here at or after time T?" is a range query.
///
/// # Examples
///
/// ```
/// use transit_graph::domain::{Coordinates, ScheduleTime, Station, StationId};
///
/// let station = Station::new(
///     StationId::from("1515"),
///     "Université Laval",
///     Coordinates::new(46.7784, -71.2747),
/// );
/// assert!(!station.has_stops());
/// assert_eq!(station.stops_from(ScheduleTime::MIDNIGHT).count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    id: StationId,
    name: String,
    description: String,
    coords: Coordinates,
    /// Ordered by arrival time, ties broken by stop index.
    stops: BTreeSet<(ScheduleTime, StopId)>,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>, coords: Coordinates) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            coords,
            stops: BTreeSet::new(),
        }
    }

    /// Attach a free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> &StationId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn coords(&self) -> &Coordinates {
        &self.coords
    }

    /// All stops at this station in arrival order.
    pub fn stops(&self) -> impl Iterator<Item = StopId> + '_ {
        self.stops.iter().map(|&(_, stop)| stop)
    }

    /// Stops arriving at or after `time`, in arrival order.
    pub fn stops_from(&self, time: ScheduleTime) -> impl Iterator<Item = StopId> + '_ {
        self.stops
            .range((Bound::Included((time, StopId(0))), Bound::Unbounded))
            .map(|&(_, stop)| stop)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn has_stops(&self) -> bool {
        !self.stops.is_empty()
    }

    pub(crate) fn add_stop(&mut self, arrival: ScheduleTime, stop: StopId) {
        self.stops.insert((arrival, stop));
    }
}
