use crate::model::{Schedule, StopId};
use std::collections::HashSet;

/// removes the stops that no route of the schedule serves. lines are shared with
/// the input schedule.
pub fn remove_unused_stops(schedule: &Schedule) -> Schedule {
    let used: HashSet<&StopId> = schedule
        .routes()
        .flat_map(|(_, route)| route.stop_ids())
        .collect();
    let mut result = Schedule {
        lines: schedule.lines.clone(),
        ..Default::default()
    };
    for stop in schedule.stops.values() {
        if used.contains(&stop.id) {
            result.add_stop(stop.clone());
        }
    }
    let removed = schedule.stops.len() - result.stops.len();
    log::info!("removed {removed} unused stop(s), {} remaining", result.stops.len());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Stop, StopId};
    use crate::trim::test_fixtures::{mock_route, mock_schedule};
    use geo::Coord;
    use std::sync::Arc;

    #[test]
    fn test_remove_unused_stops() {
        let mut schedule = mock_schedule(&[("l1", vec![mock_route("a", &["s0", "s1"])])]);
        schedule.add_stop(Arc::new(Stop::new(
            StopId::from("orphan"),
            Coord { x: 0.0, y: 0.0 },
        )));
        let cleaned = remove_unused_stops(&schedule);
        assert_eq!(cleaned.stops.len(), 2);
        assert!(cleaned.get_stop(&StopId::from("orphan")).is_none());
        assert_eq!(cleaned.lines, schedule.lines);
    }
}
