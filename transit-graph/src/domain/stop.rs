//! Stops: one vehicle calling at one station at one time.

use super::{ScheduleTime, StationId, TripId};

/// A boarding/alighting event of a trip at a station.
///
/// Stops are immutable once created. A trip orders its stops by
/// `sequence`; a station orders them by `arrival`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    station: StationId,
    trip: TripId,
    arrival: ScheduleTime,
    departure: ScheduleTime,
    sequence: u32,
}

impl Stop {
    pub fn new(
        station: StationId,
        trip: TripId,
        arrival: ScheduleTime,
        departure: ScheduleTime,
        sequence: u32,
    ) -> Self {
        Self {
            station,
            trip,
            arrival,
            departure,
            sequence,
        }
    }

    pub fn station(&self) -> &StationId {
        &self.station
    }

    pub fn trip(&self) -> &TripId {
        &self.trip
    }

    pub fn arrival(&self) -> ScheduleTime {
        self.arrival
    }

    pub fn departure(&self) -> ScheduleTime {
        self.departure
    }

    /// Position of this stop within its trip.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Seconds the vehicle dwells at the station.
    pub fn dwell_secs(&self) -> i64 {
        self.departure - self.arrival
    }
}
