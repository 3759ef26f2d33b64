//! Transfer rules between stations.

use super::StationId;

/// Permission to walk from one station to another within the network's
/// transfer system, taking at least `min_delay_secs`.
///
/// Rules are directional: a rule from A to B says nothing about B to A.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRule {
    from: StationId,
    to: StationId,
    min_delay_secs: u32,
}

impl TransferRule {
    pub fn new(from: StationId, to: StationId, min_delay_secs: u32) -> Self {
        Self {
            from,
            to,
            min_delay_secs,
        }
    }

    pub fn from(&self) -> &StationId {
        &self.from
    }

    pub fn to(&self) -> &StationId {
        &self.to
    }

    pub fn min_delay_secs(&self) -> u32 {
        self.min_delay_secs
    }
}
