//! Assembly of a [`ScheduleData`] from feed records.
//!
//! Records must be supplied in dependency order: routes and stations,
//! calendar dates, trips, stop times, then transfers. Filtering happens as
//! records arrive, so the builder never holds data outside the selected
//! date and window.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{debug, info};

use super::{ScheduleData, ScheduleError};
use crate::domain::{
    Route, RouteId, ScheduleTime, ServiceId, ServiceWindow, Station, StationId, Stop, StopId,
    TransferRule, Trip, TripId,
};

/// Calendar-date exception type (GTFS `calendar_dates.exception_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceException {
    /// Service runs on the date.
    Added,
    /// Service does not run on the date.
    Removed,
}

impl TryFrom<u8> for ServiceException {
    type Error = ScheduleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ServiceException::Added),
            2 => Ok(ServiceException::Removed),
            other => Err(ScheduleError::UnknownException(other)),
        }
    }
}

/// Builder for [`ScheduleData`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use transit_graph::domain::*;
/// use transit_graph::schedule::{ScheduleBuilder, ServiceException};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let window = ServiceWindow::new(
///     ScheduleTime::from_hms(8, 0, 0).unwrap(),
///     ScheduleTime::from_hms(10, 0, 0).unwrap(),
/// )
/// .unwrap();
///
/// let mut builder = ScheduleBuilder::new(date, window);
/// builder.add_route(Route::new(RouteId::from("r7"), "7", "Seven", RouteCategory::Regular));
/// builder.add_station(Station::new(StationId::from("A"), "A", Coordinates::new(46.0, -71.0)));
/// builder.add_service_date(ServiceId::from("wk"), date, ServiceException::Added);
/// builder
///     .add_trip(TripId::from("t1"), RouteId::from("r7"), ServiceId::from("wk"), "East")
///     .unwrap();
/// builder
///     .add_stop_time(
///         &TripId::from("t1"),
///         &StationId::from("A"),
///         ScheduleTime::from_hms(8, 30, 0).unwrap(),
///         ScheduleTime::from_hms(8, 30, 0).unwrap(),
///         1,
///     )
///     .unwrap();
///
/// let schedule = builder.build();
/// assert_eq!(schedule.stop_count(), 1);
/// ```
#[derive(Debug)]
pub struct ScheduleBuilder {
    date: NaiveDate,
    window: ServiceWindow,
    active_services: BTreeSet<ServiceId>,
    stops: Vec<Stop>,
    stations: BTreeMap<StationId, Station>,
    trips: BTreeMap<TripId, Trip>,
    routes: BTreeMap<RouteId, Route>,
    transfers: Vec<TransferRule>,
    transfer_stations: BTreeSet<StationId>,
    stop_times_final: bool,
}

impl ScheduleBuilder {
    /// Start a schedule for `date`, keeping only stops inside `window`.
    pub fn new(date: NaiveDate, window: ServiceWindow) -> Self {
        Self {
            date,
            window,
            active_services: BTreeSet::new(),
            stops: Vec::new(),
            stations: BTreeMap::new(),
            trips: BTreeMap::new(),
            routes: BTreeMap::new(),
            transfers: Vec::new(),
            transfer_stations: BTreeSet::new(),
            stop_times_final: false,
        }
    }

    pub fn add_route(&mut self, route: Route) {
        self.routes.insert(route.id().clone(), route);
    }

    pub fn add_station(&mut self, station: Station) {
        self.stations.insert(station.id().clone(), station);
    }

    /// Record a calendar-date entry.
    ///
    /// Only entries for the builder's date with [`ServiceException::Added`]
    /// activate a service. Returns whether the service became active.
    pub fn add_service_date(
        &mut self,
        service: ServiceId,
        date: NaiveDate,
        exception: ServiceException,
    ) -> bool {
        if date == self.date && exception == ServiceException::Added {
            self.active_services.insert(service)
        } else {
            false
        }
    }

    /// Add a trip. Trips whose service does not run on the date are
    /// dropped; returns whether the trip was kept.
    pub fn add_trip(
        &mut self,
        id: TripId,
        route: RouteId,
        service: ServiceId,
        headsign: impl Into<String>,
    ) -> Result<bool, ScheduleError> {
        if !self.routes.contains_key(&route) {
            return Err(ScheduleError::UnknownRoute(route));
        }
        if !self.active_services.contains(&service) {
            return Ok(false);
        }
        let trip = Trip::new(id.clone(), route, service, headsign);
        self.trips.insert(id, trip);
        Ok(true)
    }

    /// Add a stop time. It is kept if its trip was kept and the window
    /// admits its times; returns whether it was kept.
    pub fn add_stop_time(
        &mut self,
        trip_id: &TripId,
        station_id: &StationId,
        arrival: ScheduleTime,
        departure: ScheduleTime,
        sequence: u32,
    ) -> Result<bool, ScheduleError> {
        if self.stop_times_final {
            return Err(ScheduleError::StopTimesFinalized);
        }
        let Some(trip) = self.trips.get_mut(trip_id) else {
            return Ok(false);
        };
        if !self.window.admits(arrival, departure) {
            return Ok(false);
        }
        let station = self
            .stations
            .get_mut(station_id)
            .ok_or_else(|| ScheduleError::UnknownStation(station_id.clone()))?;
        if trip.has_sequence(sequence) {
            return Err(ScheduleError::DuplicateSequence {
                trip: trip_id.clone(),
                sequence,
            });
        }

        let id = StopId(self.stops.len());
        self.stops.push(Stop::new(
            station_id.clone(),
            trip_id.clone(),
            arrival,
            departure,
            sequence,
        ));
        trip.add_stop(sequence, id);
        station.add_stop(arrival, id);
        Ok(true)
    }

    /// Close the stop-time phase: drop trips and stations left without
    /// stops. Calling it again is a no-op.
    pub fn finalize_stop_times(&mut self) {
        if self.stop_times_final {
            return;
        }
        let trips_before = self.trips.len();
        let stations_before = self.stations.len();

        self.trips.retain(|_, trip| !trip.is_empty());
        self.stations.retain(|_, station| station.has_stops());
        self.stop_times_final = true;

        debug!(
            dropped_trips = trips_before - self.trips.len(),
            dropped_stations = stations_before - self.stations.len(),
            "finalized stop times"
        );
    }

    /// Add a transfer rule. Rules touching a dropped station are ignored,
    /// as is a second rule for the same station pair. A zero delay is
    /// stored as one second. Returns whether the rule was kept.
    pub fn add_transfer(
        &mut self,
        from: StationId,
        to: StationId,
        min_delay_secs: u32,
    ) -> Result<bool, ScheduleError> {
        if !self.stop_times_final {
            return Err(ScheduleError::StopTimesPending);
        }
        if !self.stations.contains_key(&from) || !self.stations.contains_key(&to) {
            return Ok(false);
        }
        if self
            .transfers
            .iter()
            .any(|rule| rule.from() == &from && rule.to() == &to)
        {
            debug!(%from, %to, "ignoring repeated transfer rule");
            return Ok(false);
        }

        self.transfer_stations.insert(from.clone());
        self.transfers
            .push(TransferRule::new(from, to, min_delay_secs.max(1)));
        Ok(true)
    }

    /// Finish the schedule, finalizing stop times if that has not happened.
    pub fn build(mut self) -> ScheduleData {
        self.finalize_stop_times();

        info!(
            date = %self.date,
            stations = self.stations.len(),
            trips = self.trips.len(),
            stops = self.stops.len(),
            transfers = self.transfers.len(),
            "schedule assembled"
        );

        ScheduleData {
            date: self.date,
            window: self.window,
            stops: self.stops,
            stations: self.stations,
            trips: self.trips,
            routes: self.routes,
            transfers: self.transfers,
            transfer_stations: self.transfer_stations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, RouteCategory};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn t(secs: u32) -> ScheduleTime {
        ScheduleTime::from_secs(secs)
    }

    /// Builder with window [1000, 5000), route "r1", stations A/B/C and an
    /// active service "on".
    fn builder() -> ScheduleBuilder {
        let window = ServiceWindow::new(t(1000), t(5000)).unwrap();
        let mut b = ScheduleBuilder::new(date(), window);
        b.add_route(Route::new(RouteId::from("r1"), "1", "One", RouteCategory::Regular));
        for id in ["A", "B", "C"] {
            b.add_station(Station::new(
                StationId::from(id),
                id,
                Coordinates::new(0.0, 0.0),
            ));
        }
        b.add_service_date(ServiceId::from("on"), date(), ServiceException::Added);
        b
    }

    fn add_trip(b: &mut ScheduleBuilder, id: &str, service: &str) -> bool {
        b.add_trip(
            TripId::from(id),
            RouteId::from("r1"),
            ServiceId::from(service),
            "",
        )
        .unwrap()
    }

    fn add_stop(b: &mut ScheduleBuilder, trip: &str, station: &str, time: u32, seq: u32) -> bool {
        b.add_stop_time(
            &TripId::from(trip),
            &StationId::from(station),
            t(time),
            t(time),
            seq,
        )
        .unwrap()
    }

    #[test]
    fn service_dates_filter_by_date_and_type() {
        let mut b = builder();
        let other = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();

        assert!(!b.add_service_date(ServiceId::from("x"), other, ServiceException::Added));
        assert!(!b.add_service_date(ServiceId::from("y"), date(), ServiceException::Removed));
        assert!(b.add_service_date(ServiceId::from("z"), date(), ServiceException::Added));
        // Already active
        assert!(!b.add_service_date(ServiceId::from("z"), date(), ServiceException::Added));
    }

    #[test]
    fn exception_codes() {
        assert_eq!(ServiceException::try_from(1).unwrap(), ServiceException::Added);
        assert_eq!(ServiceException::try_from(2).unwrap(), ServiceException::Removed);
        assert!(matches!(
            ServiceException::try_from(3),
            Err(ScheduleError::UnknownException(3))
        ));
    }

    #[test]
    fn trips_need_active_service_and_known_route() {
        let mut b = builder();
        assert!(add_trip(&mut b, "t1", "on"));
        assert!(!add_trip(&mut b, "t2", "off"));

        let err = b
            .add_trip(
                TripId::from("t3"),
                RouteId::from("nope"),
                ServiceId::from("on"),
                "",
            )
            .unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownRoute(_)));
    }

    #[test]
    fn stop_times_filtered_by_window_and_trip() {
        let mut b = builder();
        add_trip(&mut b, "t1", "on");

        assert!(add_stop(&mut b, "t1", "A", 1000, 1));
        assert!(add_stop(&mut b, "t1", "B", 4999, 2));
        assert!(!add_stop(&mut b, "t1", "C", 5000, 3));
        assert!(!add_stop(&mut b, "t1", "C", 999, 4));
        // Unknown (or dropped) trip is skipped silently
        assert!(!add_stop(&mut b, "ghost", "A", 2000, 1));

        let schedule = b.build();
        assert_eq!(schedule.stop_count(), 2);
        assert_eq!(schedule.trip(&TripId::from("t1")).unwrap().len(), 2);
    }

    #[test]
    fn stop_time_arriving_before_window_but_leaving_inside_is_kept() {
        let mut b = builder();
        add_trip(&mut b, "t1", "on");
        let kept = b
            .add_stop_time(&TripId::from("t1"), &StationId::from("A"), t(900), t(1000), 1)
            .unwrap();
        assert!(kept);
    }

    #[test]
    fn unknown_station_is_an_error() {
        let mut b = builder();
        add_trip(&mut b, "t1", "on");
        let err = b
            .add_stop_time(&TripId::from("t1"), &StationId::from("Z"), t(2000), t(2000), 1)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownStation(_)));
    }

    #[test]
    fn duplicate_sequence_is_an_error() {
        let mut b = builder();
        add_trip(&mut b, "t1", "on");
        add_stop(&mut b, "t1", "A", 2000, 1);
        let err = b
            .add_stop_time(&TripId::from("t1"), &StationId::from("B"), t(2100), t(2100), 1)
            .unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::DuplicateSequence { sequence: 1, .. }
        ));
    }

    #[test]
    fn finalize_prunes_empty_trips_and_stations() {
        let mut b = builder();
        add_trip(&mut b, "t1", "on");
        add_trip(&mut b, "t2", "on");
        add_stop(&mut b, "t1", "A", 2000, 1);
        add_stop(&mut b, "t1", "B", 2100, 2);

        let schedule = b.build();
        assert_eq!(schedule.trip_count(), 1);
        assert!(schedule.trip(&TripId::from("t2")).is_none());
        assert_eq!(schedule.station_count(), 2);
        assert!(schedule.station(&StationId::from("C")).is_none());
    }

    #[test]
    fn stop_times_rejected_after_finalize() {
        let mut b = builder();
        add_trip(&mut b, "t1", "on");
        b.finalize_stop_times();
        let err = b
            .add_stop_time(&TripId::from("t1"), &StationId::from("A"), t(2000), t(2000), 1)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::StopTimesFinalized));
    }

    #[test]
    fn transfers_require_finalized_stop_times() {
        let mut b = builder();
        let err = b
            .add_transfer(StationId::from("A"), StationId::from("B"), 60)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::StopTimesPending));
    }

    #[test]
    fn transfer_rules() {
        let mut b = builder();
        add_trip(&mut b, "t1", "on");
        add_stop(&mut b, "t1", "A", 2000, 1);
        add_stop(&mut b, "t1", "B", 2100, 2);
        b.finalize_stop_times();

        assert!(b.add_transfer(StationId::from("A"), StationId::from("B"), 0).unwrap());
        assert!(!b.add_transfer(StationId::from("A"), StationId::from("B"), 90).unwrap());
        // C was dropped for having no stops
        assert!(!b.add_transfer(StationId::from("A"), StationId::from("C"), 60).unwrap());
        assert!(b.add_transfer(StationId::from("B"), StationId::from("B"), 30).unwrap());

        let schedule = b.build();
        assert_eq!(schedule.transfers().len(), 2);
        assert_eq!(schedule.transfers()[0].min_delay_secs(), 1);
        assert!(schedule.is_transfer_station(&StationId::from("A")));
        assert!(schedule.is_transfer_station(&StationId::from("B")));
        assert_eq!(schedule.transfer_stations().len(), 2);
    }
}
