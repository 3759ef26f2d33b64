//! Schedule assembly errors.

use std::path::PathBuf;

use crate::domain::{RouteId, StationId, TimeError, TripId};

/// Errors raised while assembling or loading a schedule repository.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A stop time or transfer names a station that was never added
    #[error("unknown station {0}")]
    UnknownStation(StationId),

    /// A trip names a route that was never added
    #[error("unknown route {0}")]
    UnknownRoute(RouteId),

    /// Two stop times of one trip share a sequence number
    #[error("trip {trip} has more than one stop with sequence {sequence}")]
    DuplicateSequence { trip: TripId, sequence: u32 },

    /// Transfers were supplied before stop times were finalized
    #[error("stop times must be finalized before transfers are added")]
    StopTimesPending,

    /// Stop times were supplied after they were finalized
    #[error("stop times are already finalized")]
    StopTimesFinalized,

    /// The service window is empty
    #[error("service window must start before it ends ({start} >= {end})")]
    EmptyWindow { start: String, end: String },

    /// A calendar-date entry carries an exception type other than 1 or 2
    #[error("unknown calendar exception type {0}")]
    UnknownException(u8),

    /// A time field could not be parsed
    #[error(transparent)]
    Time(#[from] TimeError),

    /// Reading a snapshot file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot file is not valid JSON for the expected layout
    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ScheduleError::UnknownStation(StationId::from("9999"));
        assert_eq!(err.to_string(), "unknown station 9999");

        let err = ScheduleError::DuplicateSequence {
            trip: TripId::from("t1"),
            sequence: 4,
        };
        assert_eq!(
            err.to_string(),
            "trip t1 has more than one stop with sequence 4"
        );

        let err = ScheduleError::StopTimesPending;
        assert_eq!(
            err.to_string(),
            "stop times must be finalized before transfers are added"
        );
    }
}
