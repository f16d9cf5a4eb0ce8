use crate::model::{Schedule, StopId};
use geo::{Contains, MultiPolygon, Point};
use rayon::prelude::*;
use std::collections::HashSet;

/// the set of stops lying inside the exclusion zone. computed once per schedule;
/// membership is a pure function of the stop id afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneMembership {
    stops: HashSet<StopId>,
}

impl ZoneMembership {
    pub fn from_stop_ids<I>(stop_ids: I) -> ZoneMembership
    where
        I: IntoIterator<Item = StopId>,
    {
        ZoneMembership {
            stops: stop_ids.into_iter().collect(),
        }
    }

    /// tests every stop of the schedule against the zone polygons. a stop is inside if
    /// any polygon contains its coordinate; points on a polygon boundary are outside.
    pub fn from_geometries(schedule: &Schedule, zones: &[MultiPolygon<f64>]) -> ZoneMembership {
        log::info!(
            "testing {} stops against {} zone polygon(s)",
            schedule.stops.len(),
            zones.len()
        );
        let stops: HashSet<StopId> = schedule
            .stops
            .par_iter()
            .filter(|(_, stop)| {
                let point = Point::from(stop.coord);
                zones.iter().any(|zone| zone.contains(&point))
            })
            .map(|(stop_id, _)| stop_id.clone())
            .collect();
        log::info!("{} stops found within the zone", stops.len());
        ZoneMembership { stops }
    }

    pub fn contains(&self, stop_id: &StopId) -> bool {
        self.stops.contains(stop_id)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Stop;
    use geo::{polygon, Coord};
    use std::sync::Arc;

    #[test]
    fn test_membership_from_geometries() {
        let mut schedule = Schedule::default();
        for (id, x, y) in [("in", 5.0, 5.0), ("out", 15.0, 5.0), ("edge", 10.0, 5.0)] {
            schedule.add_stop(Arc::new(Stop::new(StopId::from(id), Coord { x, y })));
        }
        let zone = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
            (x: 0.0, y: 0.0),
        ]]);
        let membership = ZoneMembership::from_geometries(&schedule, &[zone]);
        assert!(membership.contains(&StopId::from("in")));
        assert!(!membership.contains(&StopId::from("out")));
        assert!(!membership.contains(&StopId::from("edge")));
        assert_eq!(membership.len(), 1);
    }

    #[test]
    fn test_membership_from_ids() {
        let membership = ZoneMembership::from_stop_ids(vec![StopId::from("a"), StopId::from("b")]);
        assert!(membership.contains(&StopId::from("a")));
        assert!(!membership.contains(&StopId::from("c")));
    }
}
