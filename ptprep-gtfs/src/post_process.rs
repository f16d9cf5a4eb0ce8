//! departure copies that let a single-day schedule cover the night. GTFS times past
//! midnight belong to the previous service day, so a departure at 25:10 also has to run
//! at 01:10, and early departures are repeated after the end of the day.
use ptprep::model::{Departure, DepartureId, Route, Schedule};
use std::sync::Arc;

/// copies every departure at or after `day_length` seconds to `departure_time - day_length`.
/// copies get the id `{departure}_{suffix}`; departures that already have a copy are skipped.
pub fn copy_late_departures_to_start_of_day(
    schedule: &Schedule,
    day_length: u32,
    suffix: &str,
) -> Schedule {
    copy_departures(schedule, suffix, |time| {
        (time >= day_length).then(|| time - day_length)
    })
}

/// copies every departure before `threshold` seconds to `departure_time + 24h`. copies made
/// by earlier passes (ids ending in `_{suffix}`) are not copied again.
pub fn copy_early_departures_to_following_night(
    schedule: &Schedule,
    threshold: u32,
    suffix: &str,
) -> Schedule {
    copy_departures(schedule, suffix, |time| {
        (time < threshold).then(|| time + 24 * 3600)
    })
}

fn copy_departures<F>(schedule: &Schedule, suffix: &str, shift: F) -> Schedule
where
    F: Fn(u32) -> Option<u32>,
{
    let copy_marker = format!("_{suffix}");
    let mut result = schedule.with_stops_only();
    let mut copied = 0;
    for line in schedule.lines.values() {
        let mut line_new = line.empty_copy();
        for route in line.routes.values() {
            let copies: Vec<Departure> = route
                .departures
                .values()
                .filter(|d| !d.id.as_str().ends_with(&copy_marker))
                .filter_map(|d| {
                    let time = shift(d.departure_time)?;
                    let id = DepartureId::new(format!("{}{copy_marker}", d.id));
                    if route.departures.contains_key(&id) {
                        return None;
                    }
                    Some(Departure::new(id, time))
                })
                .collect();
            if copies.is_empty() {
                line_new.add_route(route.clone());
                continue;
            }
            copied += copies.len();
            let mut route_new: Route = route.as_ref().clone();
            for departure in copies {
                route_new.add_departure(departure);
            }
            line_new.add_route(Arc::new(route_new));
        }
        result.add_line(Arc::new(line_new));
    }
    log::info!("copied {copied} departure(s)");
    result
}
