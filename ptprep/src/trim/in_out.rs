use crate::{model::Route, zone::ZoneMembership};
use itertools::Itertools;

/// per-stop zone membership of a route, in stop order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InOutSequence(pub Vec<bool>);

impl InOutSequence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn any_inside(&self) -> bool {
        self.0.iter().any(|in_zone| *in_zone)
    }

    pub fn any_outside(&self) -> bool {
        self.0.iter().any(|in_zone| !*in_zone)
    }

    /// share of stops inside the zone. NaN for a route without stops.
    pub fn inside_ratio(&self) -> f64 {
        let inside = self.0.iter().filter(|in_zone| **in_zone).count();
        inside as f64 / self.0.len() as f64
    }

    /// length of the run of in-zone (`value = true`) or out-of-zone stops at the start
    pub fn leading_run(&self, value: bool) -> usize {
        self.0.iter().take_while(|in_zone| **in_zone == value).count()
    }

    /// length of the run of in-zone (`value = true`) or out-of-zone stops at the end
    pub fn trailing_run(&self, value: bool) -> usize {
        self.0.iter().rev().take_while(|in_zone| **in_zone == value).count()
    }
}

impl From<Vec<bool>> for InOutSequence {
    fn from(value: Vec<bool>) -> Self {
        InOutSequence(value)
    }
}

/// marks each stop of the route as inside (true) or outside (false) the zone.
pub fn classify(route: &Route, zone: &ZoneMembership) -> InOutSequence {
    InOutSequence(
        route
            .stop_ids()
            .map(|stop_id| zone.contains(stop_id))
            .collect_vec(),
    )
}
