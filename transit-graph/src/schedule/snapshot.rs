//! JSON snapshot of feed records.
//!
//! A snapshot is a flat, already-parsed dump of the records a feed loader
//! would produce. It is replayed through [`ScheduleBuilder`] so the same
//! filtering rules apply no matter where the records came from.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ScheduleBuilder, ScheduleData, ScheduleError, ServiceException};
use crate::domain::{
    Coordinates, Route, RouteCategory, RouteId, ScheduleTime, ServiceId, ServiceWindow, Station,
    StationId, TripId,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub id: RouteId,
    pub number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: StationId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDateRecord {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub exception_type: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: TripId,
    pub route_id: RouteId,
    pub service_id: ServiceId,
    #[serde(default)]
    pub headsign: String,
}

/// Times are `HH:MM:SS` strings; hours may exceed 23.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopTimeRecord {
    pub trip_id: TripId,
    pub station_id: StationId,
    pub arrival: String,
    pub departure: String,
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub from_station_id: StationId,
    pub to_station_id: StationId,
    #[serde(default)]
    pub min_transfer_time: u32,
}

/// Every record needed to assemble one [`ScheduleData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub date: NaiveDate,
    pub window_start: String,
    pub window_end: String,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
    #[serde(default)]
    pub stations: Vec<StationRecord>,
    #[serde(default)]
    pub calendar_dates: Vec<CalendarDateRecord>,
    #[serde(default)]
    pub trips: Vec<TripRecord>,
    #[serde(default)]
    pub stop_times: Vec<StopTimeRecord>,
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
}

impl ScheduleSnapshot {
    /// Read a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ScheduleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Replay the records through a [`ScheduleBuilder`].
    pub fn into_schedule(self) -> Result<ScheduleData, ScheduleError> {
        let start = ScheduleTime::parse(&self.window_start)?;
        let end = ScheduleTime::parse(&self.window_end)?;
        let window = ServiceWindow::new(start, end).ok_or_else(|| ScheduleError::EmptyWindow {
            start: self.window_start.clone(),
            end: self.window_end.clone(),
        })?;

        let mut builder = ScheduleBuilder::new(self.date, window);

        for r in self.routes {
            let category = RouteCategory::from_color(&r.color);
            builder.add_route(Route::new(r.id, r.number, r.name, category));
        }
        for s in self.stations {
            let station = Station::new(s.id, s.name, Coordinates::new(s.latitude, s.longitude))
                .with_description(s.description);
            builder.add_station(station);
        }
        for c in self.calendar_dates {
            let exception = ServiceException::try_from(c.exception_type)?;
            builder.add_service_date(c.service_id, c.date, exception);
        }
        for t in self.trips {
            builder.add_trip(t.id, t.route_id, t.service_id, t.headsign)?;
        }
        for st in self.stop_times {
            let arrival = ScheduleTime::parse(&st.arrival)?;
            let departure = ScheduleTime::parse(&st.departure)?;
            builder.add_stop_time(&st.trip_id, &st.station_id, arrival, departure, st.sequence)?;
        }

        builder.finalize_stop_times();
        for tr in self.transfers {
            builder.add_transfer(tr.from_station_id, tr.to_station_id, tr.min_transfer_time)?;
        }

        Ok(builder.build())
    }
}
