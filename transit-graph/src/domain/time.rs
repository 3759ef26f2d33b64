//! Schedule time handling.
//!
//! Static schedules express times as `HH:MM:SS` offsets from the start of
//! the service day. Hours may exceed 23 for trips that run past midnight, so
//! a wall-clock `NaiveTime` is not enough: this module stores plain seconds
//! and converts to `chrono` types at the edges.

use std::fmt;
use std::ops::Sub;

use chrono::{Duration, NaiveTime, Timelike};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time within the service day, in seconds since its start.
///
/// # Examples
///
/// ```
/// use transit_graph::domain::ScheduleTime;
///
/// let t = ScheduleTime::parse("08:15:30").unwrap();
/// assert_eq!(t.as_secs(), 8 * 3600 + 15 * 60 + 30);
/// assert_eq!(t.to_string(), "08:15:30");
///
/// // Trips running past midnight keep counting hours
/// let late = ScheduleTime::parse("25:10:00").unwrap();
/// assert!(late > t);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ScheduleTime(u32);

impl ScheduleTime {
    /// Start of the service day.
    pub const MIDNIGHT: Self = Self(0);

    /// Create a time from seconds since the start of the service day.
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Create a time from hour, minute and second components, or `None`
    /// if the total number of seconds does not fit.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        hours
            .checked_mul(3600)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(seconds)
            .map(Self)
    }

    /// Parse a time from `H:MM:SS` or `HH:MM:SS`.
    ///
    /// Hours are not limited to 23.
    ///
    /// ```
    /// use transit_graph::domain::ScheduleTime;
    ///
    /// assert!(ScheduleTime::parse("7:05:00").is_ok());
    /// assert!(ScheduleTime::parse("07:05").is_err());
    /// assert!(ScheduleTime::parse("07:65:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.trim().split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected HH:MM:SS format"));
        };

        if h.is_empty() || h.len() > 3 || !h.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::new("invalid hour digits"));
        }
        let hours: u32 = h
            .parse()
            .map_err(|_| TimeError::new("invalid hour digits"))?;

        let minutes =
            parse_two_digits(m.as_bytes()).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minutes > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let seconds = parse_two_digits(sec.as_bytes())
            .ok_or_else(|| TimeError::new("invalid second digits"))?;
        if seconds > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Self::from_hms(hours, minutes, seconds)
            .ok_or_else(|| TimeError::new("time out of range"))
    }

    /// Seconds since the start of the service day.
    pub const fn as_secs(self) -> u32 {
        self.0
    }

    pub fn hours(self) -> u32 {
        self.0 / 3600
    }

    pub fn minutes(self) -> u32 {
        (self.0 / 60) % 60
    }

    pub fn seconds(self) -> u32 {
        self.0 % 60
    }

    /// Add seconds, clamping at the largest representable time.
    pub fn saturating_add_secs(self, secs: u32) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Add a duration, returning `None` on overflow or if the result would
    /// be before the start of the service day.
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        let secs = i64::from(self.0).checked_add(duration.num_seconds())?;
        u32::try_from(secs).ok().map(Self)
    }

    /// Signed number of seconds from `earlier` to `self`.
    ///
    /// Negative if `earlier` is actually later.
    pub fn secs_since(self, earlier: Self) -> i64 {
        i64::from(self.0) - i64::from(earlier.0)
    }

    /// Wall-clock time, if this time falls within the first 24 hours.
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        NaiveTime::from_num_seconds_from_midnight_opt(self.0, 0)
    }
}

impl From<NaiveTime> for ScheduleTime {
    fn from(time: NaiveTime) -> Self {
        Self(time.num_seconds_from_midnight())
    }
}

impl Sub for ScheduleTime {
    type Output = i64;

    fn sub(self, rhs: Self) -> Self::Output {
        self.secs_since(rhs)
    }
}

impl fmt::Debug for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleTime({self})")
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// The `[start, end)` slice of the service day a schedule was loaded for.
///
/// `start` doubles as the earliest instant a traveller can leave the
/// origin point of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    start: ScheduleTime,
    end: ScheduleTime,
}

impl ServiceWindow {
    /// Create a window. Returns `None` unless `start < end`.
    pub fn new(start: ScheduleTime, end: ScheduleTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> ScheduleTime {
        self.start
    }

    pub fn end(&self) -> ScheduleTime {
        self.end
    }

    /// Whether a stop with these times belongs to the window.
    ///
    /// A stop is kept when the vehicle leaves at or after `start` and has
    /// arrived strictly before `end`.
    pub fn admits(&self, arrival: ScheduleTime, departure: ScheduleTime) -> bool {
        self.start <= departure && arrival < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        assert_eq!(ScheduleTime::parse("00:00:00").unwrap().as_secs(), 0);
        assert_eq!(ScheduleTime::parse("7:05:09").unwrap().as_secs(), 25509);
        assert_eq!(ScheduleTime::parse("23:59:59").unwrap().as_secs(), 86399);
        assert_eq!(ScheduleTime::parse(" 12:00:00 ").unwrap().hours(), 12);
    }

    #[test]
    fn parse_past_midnight() {
        let t = ScheduleTime::parse("26:30:00").unwrap();
        assert_eq!(t.hours(), 26);
        assert_eq!(t.minutes(), 30);
        assert!(t.to_naive_time().is_none());
    }

    #[test]
    fn reject_bad_format() {
        assert!(ScheduleTime::parse("").is_err());
        assert!(ScheduleTime::parse("12:00").is_err());
        assert!(ScheduleTime::parse("12:00:00:00").is_err());
        assert!(ScheduleTime::parse("ab:00:00").is_err());
        assert!(ScheduleTime::parse("12:0:00").is_err());
        assert!(ScheduleTime::parse("12:60:00").is_err());
        assert!(ScheduleTime::parse("12:00:60").is_err());
        assert!(ScheduleTime::parse("-1:00:00").is_err());
    }

    #[test]
    fn display_pads_components() {
        assert_eq!(ScheduleTime::from_hms(8, 5, 3).unwrap().to_string(), "08:05:03");
        assert_eq!(
            format!("{:?}", ScheduleTime::from_secs(61)),
            "ScheduleTime(00:01:01)"
        );
    }

    #[test]
    fn from_hms_rejects_overflow() {
        assert_eq!(
            ScheduleTime::from_hms(25, 10, 5),
            Some(ScheduleTime::from_secs(90_605))
        );
        assert_eq!(ScheduleTime::from_hms(1_193_047, 0, 0), None);
        assert_eq!(ScheduleTime::from_hms(0, u32::MAX, 0), None);
        assert_eq!(ScheduleTime::from_hms(1_193_046, 28, 16), None);
        assert_eq!(
            ScheduleTime::from_hms(1_193_046, 28, 15),
            Some(ScheduleTime::from_secs(u32::MAX))
        );
    }

    #[test]
    fn subtraction_is_signed() {
        let a = ScheduleTime::from_secs(1000);
        let b = ScheduleTime::from_secs(1150);
        assert_eq!(b - a, 150);
        assert_eq!(a - b, -150);
        assert_eq!(a.secs_since(a), 0);
    }

    #[test]
    fn checked_add_durations() {
        let t = ScheduleTime::from_secs(100);
        assert_eq!(
            t.checked_add(Duration::seconds(20)),
            Some(ScheduleTime::from_secs(120))
        );
        assert_eq!(t.checked_add(Duration::seconds(-101)), None);
        assert_eq!(
            ScheduleTime::from_secs(u32::MAX).saturating_add_secs(5),
            ScheduleTime::from_secs(u32::MAX)
        );
    }

    #[test]
    fn naive_time_conversion() {
        let naive = NaiveTime::from_hms_opt(14, 30, 15).unwrap();
        let t = ScheduleTime::from(naive);
        assert_eq!(t, ScheduleTime::from_hms(14, 30, 15).unwrap());
        assert_eq!(t.to_naive_time(), Some(naive));
    }

    #[test]
    fn window_admission() {
        let window =
            ServiceWindow::new(ScheduleTime::from_secs(100), ScheduleTime::from_secs(200))
                .unwrap();

        assert!(window.admits(ScheduleTime::from_secs(90), ScheduleTime::from_secs(100)));
        assert!(window.admits(ScheduleTime::from_secs(199), ScheduleTime::from_secs(199)));
        assert!(!window.admits(ScheduleTime::from_secs(90), ScheduleTime::from_secs(99)));
        assert!(!window.admits(ScheduleTime::from_secs(200), ScheduleTime::from_secs(210)));
    }

    #[test]
    fn window_requires_order() {
        let t = ScheduleTime::from_secs(5);
        assert!(ServiceWindow::new(t, t).is_none());
        assert!(ServiceWindow::new(ScheduleTime::from_secs(6), t).is_none());
    }
}
