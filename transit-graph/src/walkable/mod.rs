//! Walking access to stations.
//!
//! A query starts and ends at arbitrary points, not at stations. This
//! module decides which stations are close enough to walk to or from, and
//! how long the walk takes. The distance metric is supplied by the caller;
//! the great-circle distance is the default.

use chrono::Duration;

use crate::domain::{Coordinates, Station};
use crate::schedule::ScheduleData;

/// Distance in kilometres between two points.
pub type DistanceMetric = fn(&Coordinates, &Coordinates) -> f64;

fn haversine(a: &Coordinates, b: &Coordinates) -> f64 {
    a.haversine_km(b)
}

/// Walking speed, maximum walking distance and distance metric.
///
/// # Examples
///
/// ```
/// use transit_graph::domain::Coordinates;
/// use transit_graph::walkable::WalkingModel;
///
/// // Treat coordinates as planar kilometres for the example.
/// fn planar(a: &Coordinates, b: &Coordinates) -> f64 {
///     (a.latitude - b.latitude).hypot(a.longitude - b.longitude)
/// }
///
/// let model = WalkingModel::new(1.5, 5.0).with_metric(planar);
/// let here = Coordinates::new(0.0, 0.0);
///
/// assert_eq!(model.walk_secs(&here, &Coordinates::new(0.5, 0.0)), Some(360));
/// assert_eq!(model.walk_secs(&here, &Coordinates::new(2.0, 0.0)), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WalkingModel {
    max_distance_km: f64,
    speed_kmh: f64,
    metric: DistanceMetric,
}

impl WalkingModel {
    /// Create a model using the great-circle distance.
    pub fn new(max_distance_km: f64, speed_kmh: f64) -> Self {
        Self {
            max_distance_km,
            speed_kmh,
            metric: haversine,
        }
    }

    /// Replace the distance metric.
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    pub fn distance_km(&self, from: &Coordinates, to: &Coordinates) -> f64 {
        (self.metric)(from, to)
    }

    /// Walking time in whole seconds, rounded up, or `None` if the points
    /// are farther apart than the maximum walking distance.
    pub fn walk_secs(&self, from: &Coordinates, to: &Coordinates) -> Option<u32> {
        let distance = self.distance_km(from, to);
        if !distance.is_finite() || distance > self.max_distance_km {
            return None;
        }
        let secs = (distance * 3600.0 / self.speed_kmh).ceil();
        if secs.is_finite() && secs >= 0.0 && secs <= f64::from(u32::MAX) {
            Some(secs as u32)
        } else {
            None
        }
    }

    /// Walking time as a duration, if walkable.
    pub fn walk_duration(&self, from: &Coordinates, to: &Coordinates) -> Option<Duration> {
        self.walk_secs(from, to)
            .map(|secs| Duration::seconds(i64::from(secs)))
    }

    pub fn is_walkable(&self, from: &Coordinates, to: &Coordinates) -> bool {
        self.walk_secs(from, to).is_some()
    }

    /// Stations within walking distance of `point`, with the walking time
    /// in seconds, in station identifier order.
    pub fn stations_near<'s>(
        &self,
        point: &Coordinates,
        schedule: &'s ScheduleData,
    ) -> Vec<(&'s Station, u32)> {
        schedule
            .stations()
            .filter_map(|station| {
                self.walk_secs(point, station.coords())
                    .map(|secs| (station, secs))
            })
            .collect()
    }
}
