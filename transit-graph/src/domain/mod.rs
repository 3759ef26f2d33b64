//! Domain types for the transit schedule.
//!
//! This module contains the value types the graph is built from: stations,
//! trips, stops, routes and transfer rules. Stops are owned by the schedule
//! repository and referred to everywhere else by [`StopId`].

mod coords;
mod ids;
mod route;
mod station;
mod stop;
mod time;
mod transfer;
mod trip;

pub use coords::{Coordinates, InvalidCoordinates};
pub use ids::{RouteId, ServiceId, StationId, StopId, TripId};
pub use route::{Route, RouteCategory};
pub use station::Station;
pub use stop::Stop;
pub use time::{ScheduleTime, ServiceWindow, TimeError};
pub use transfer::TransferRule;
pub use trip::Trip;
