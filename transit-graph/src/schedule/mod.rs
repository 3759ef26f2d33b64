//! In-memory schedule repository.
//!
//! [`ScheduleData`] is the single owner of every [`Stop`] for one service
//! date and time window. Trips and stations refer to stops by [`StopId`],
//! and so does the graph built on top of it.
//!
//! The repository is assembled with [`ScheduleBuilder`], which applies the
//! date and window filtering rules, or loaded from a JSON
//! [`ScheduleSnapshot`].

mod builder;
mod error;
mod snapshot;

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::domain::{
    Route, RouteId, ServiceWindow, Station, StationId, Stop, StopId, TransferRule, Trip, TripId,
};

pub use builder::{ScheduleBuilder, ServiceException};
pub use error::ScheduleError;
pub use snapshot::{
    CalendarDateRecord, RouteRecord, ScheduleSnapshot, StationRecord, StopTimeRecord,
    TransferRecord, TripRecord,
};

/// Validated schedule data for one date and time window.
///
/// Invariants, established by [`ScheduleBuilder`]:
/// - every stop belongs to exactly one kept trip and one kept station;
/// - no trip and no station is empty;
/// - every transfer joins two kept stations, and its origin is listed in
///   [`transfer_stations`](Self::transfer_stations).
#[derive(Debug, Clone)]
pub struct ScheduleData {
    date: NaiveDate,
    window: ServiceWindow,
    stops: Vec<Stop>,
    stations: BTreeMap<StationId, Station>,
    trips: BTreeMap<TripId, Trip>,
    routes: BTreeMap<RouteId, Route>,
    transfers: Vec<TransferRule>,
    transfer_stations: BTreeSet<StationId>,
}

impl ScheduleData {
    /// The service date the schedule was filtered for.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn window(&self) -> ServiceWindow {
        self.window
    }

    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id.0)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Stations in identifier order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Trips in identifier order.
    pub fn trips(&self) -> impl Iterator<Item = &Trip> {
        self.trips.values()
    }

    pub fn trip(&self, id: &TripId) -> Option<&Trip> {
        self.trips.get(id)
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    pub fn transfers(&self) -> &[TransferRule] {
        &self.transfers
    }

    /// Stations that are the origin of at least one transfer rule.
    pub fn transfer_stations(&self) -> &BTreeSet<StationId> {
        &self.transfer_stations
    }

    pub fn is_transfer_station(&self, id: &StationId) -> bool {
        self.transfer_stations.contains(id)
    }
}
