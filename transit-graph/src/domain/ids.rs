//! Identifier types for schedule entities.
//!
//! Identifiers come straight from the schedule feed and are opaque strings.
//! Wrapping each kind in its own type keeps a trip id from being looked up
//! in the station table by accident.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

string_id!(
    /// Feed identifier of a station (GTFS `stop_id`).
    StationId
);
string_id!(
    /// Feed identifier of a trip.
    TripId
);
string_id!(
    /// Feed identifier of a route.
    RouteId
);
string_id!(
    /// Feed identifier of a service calendar.
    ServiceId
);

/// Index of a stop in the schedule repository.
///
/// Stops are owned by [`ScheduleData`](crate::schedule::ScheduleData);
/// trips, stations and the graph refer to them through this index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub usize);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for StopId {
    fn from(value: usize) -> Self {
        StopId(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_debug() {
        let id = StationId::new("1515");
        assert_eq!(id.to_string(), "1515");
        assert_eq!(format!("{id:?}"), "StationId(1515)");
        assert_eq!(StopId(7).to_string(), "#7");
    }

    #[test]
    fn ids_order_lexically() {
        assert!(TripId::from("a") < TripId::from("b"));
        assert!(RouteId::from("10") < RouteId::from("9"));
    }

    #[test]
    fn serde_is_transparent() {
        let id: ServiceId = serde_json::from_str("\"weekday\"").unwrap();
        assert_eq!(id.as_str(), "weekday");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"weekday\"");
    }
}
