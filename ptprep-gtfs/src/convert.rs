//! builds a transit [`Schedule`] from the trips of a GTFS feed running on one date.
use crate::{
    feed::GtfsFeed, service_calendar::ServiceCalendar, GtfsConversionError,
    MissingStopLocationPolicy,
};
use chrono::NaiveDate;
use geo::Coord;
use gtfs_structures::{Gtfs, Stop as GtfsStop, StopTime, Trip};
use itertools::Itertools;
use kdam::tqdm;
use ptprep::model::{
    Departure, DepartureId, Line, LineId, LinkPath, Route, RouteId, RouteStop, Schedule, Stop,
    StopId,
};
use std::{collections::HashMap, sync::Arc};

pub const GTFS_ROUTE_TYPE: &str = "gtfs_route_type";
pub const GTFS_AGENCY_ID: &str = "gtfs_agency_id";

#[derive(Debug, Clone)]
pub struct ConversionOptions {
    pub missing_stop_location_policy: MissingStopLocationPolicy,
    /// transport mode assigned to every converted route
    pub transport_mode: String,
    /// CRS of the network the pseudo network is added to, such as `EPSG:31468`.
    /// stop locations stay WGS84 lon,lat when unset.
    pub target_crs: Option<String>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            missing_stop_location_policy: MissingStopLocationPolicy::Fail,
            transport_mode: String::from("pt"),
            target_crs: None,
        }
    }
}

/// a trip reduced to what its route needs: the stop pattern with offsets relative to
/// the first departure, and the absolute departure times it runs at.
struct TripPattern {
    stops: Vec<RouteStop>,
    departures: Vec<(DepartureId, u32)>,
}

/// converts the trips of `feed` that run on `date` into a schedule. every GTFS route
/// becomes a line, tagged with its route type and agency, holding one route per
/// distinct stop pattern. only stops served by a converted route are added.
///
/// # Arguments
///
/// * `feed` - the GTFS feed
/// * `date` - service date to convert
/// * `options` - handling of stops without location, transport mode
///
/// # Returns
///
/// the schedule, or an error if a stop has no location and the policy is
/// [`MissingStopLocationPolicy::Fail`]
pub fn convert_feed(
    feed: &GtfsFeed,
    date: NaiveDate,
    options: &ConversionOptions,
) -> Result<Schedule, GtfsConversionError> {
    let gtfs = &feed.gtfs;
    let calendar = ServiceCalendar::new(gtfs, date);

    // lon,lat of every stop, or of its parent station when missing
    let stop_locations: HashMap<&str, Option<Coord<f64>>> = gtfs
        .stops
        .iter()
        .map(|(stop_id, stop)| (stop_id.as_str(), get_stop_location(stop, gtfs)))
        .collect();

    let trips_by_route = gtfs
        .trips
        .values()
        .filter(|t| calendar.runs(&t.service_id))
        .sorted_by(|a, b| a.id.cmp(&b.id))
        .into_group_map_by(|t| t.route_id.clone());

    let mut schedule = Schedule::default();
    let iter = tqdm!(
        trips_by_route.into_iter().sorted_by(|a, b| a.0.cmp(&b.0)),
        desc = "convert GTFS routes"
    );
    for (gtfs_route_id, trips) in iter {
        let line_id = LineId::new(gtfs_route_id.clone());
        let mut patterns: Vec<TripPattern> = vec![];
        for trip in trips {
            let Some(trip_pattern) = build_trip_pattern(trip, &stop_locations, options)? else {
                continue;
            };
            match patterns.iter_mut().find(|p| p.stops == trip_pattern.stops) {
                Some(existing) => existing.departures.extend(trip_pattern.departures),
                None => patterns.push(trip_pattern),
            }
        }
        if patterns.is_empty() {
            log::info!("GTFS route {gtfs_route_id} has no trips on {date}, skipping");
            continue;
        }

        let mut line = Line::new(line_id.clone());
        if let Some(code) = feed.route_type_code(&gtfs_route_id) {
            line.attributes
                .insert(GTFS_ROUTE_TYPE.to_string(), code.to_string());
        }
        let agency_id = gtfs
            .routes
            .get(&gtfs_route_id)
            .and_then(|r| r.agency_id.clone())
            .unwrap_or_default();
        line.attributes.insert(GTFS_AGENCY_ID.to_string(), agency_id);

        for (n, pattern) in patterns.into_iter().enumerate() {
            for route_stop in pattern.stops.iter() {
                if schedule.get_stop(&route_stop.stop_id).is_none() {
                    let coord = stop_locations
                        .get(route_stop.stop_id.as_str())
                        .copied()
                        .flatten()
                        .ok_or_else(|| {
                            GtfsConversionError::MissingStopLocationAndParentError(
                                route_stop.stop_id.to_string(),
                            )
                        })?;
                    schedule.add_stop(Arc::new(Stop::new(route_stop.stop_id.clone(), coord)));
                }
            }
            let route_id = RouteId::new(format!("{line_id}_{n}"));
            let mut route = Route::new(
                route_id,
                LinkPath::default(),
                pattern.stops,
                &options.transport_mode,
            );
            for (departure_id, time) in pattern.departures {
                route.add_departure(Departure::new(departure_id, time));
            }
            line.add_route(Arc::new(route));
        }
        schedule.add_line(Arc::new(line));
    }

    log::info!(
        "converted {} lines with {} routes serving {} stops",
        schedule.lines.len(),
        schedule.route_count(),
        schedule.stops.len()
    );
    Ok(schedule)
}

fn build_trip_pattern(
    trip: &Trip,
    stop_locations: &HashMap<&str, Option<Coord<f64>>>,
    options: &ConversionOptions,
) -> Result<Option<TripPattern>, GtfsConversionError> {
    let mut located: Vec<&StopTime> = vec![];
    for stop_time in get_ordered_stops(trip) {
        let has_location = stop_locations
            .get(stop_time.stop.id.as_str())
            .is_some_and(|l| l.is_some());
        if has_location {
            located.push(stop_time);
            continue;
        }
        match options.missing_stop_location_policy {
            MissingStopLocationPolicy::Fail => {
                return Err(GtfsConversionError::MissingStopLocationAndParentError(
                    stop_time.stop.id.clone(),
                ))
            }
            MissingStopLocationPolicy::DropStop => {
                log::warn!("dropping stop {} from trip {}", stop_time.stop.id, trip.id);
            }
        }
    }

    if located.len() < 2 {
        log::warn!("trip {} serves fewer than two stops, skipping", trip.id);
        return Ok(None);
    }
    let Some(start) = located
        .first()
        .and_then(|st| st.departure_time.or(st.arrival_time))
    else {
        log::warn!("trip {} has no time at its first stop, skipping", trip.id);
        return Ok(None);
    };

    let stops = located
        .iter()
        .map(|st| {
            let mut route_stop = RouteStop::new(
                StopId::new(st.stop.id.clone()),
                st.arrival_time.map(|t| t.saturating_sub(start)),
                st.departure_time.map(|t| t.saturating_sub(start)),
            );
            route_stop.await_departure = true;
            route_stop
        })
        .collect_vec();

    let departures = if trip.frequencies.is_empty() {
        vec![(DepartureId::new(trip.id.clone()), start)]
    } else {
        // frequency based trips run every headway within each window
        let mut departures = vec![];
        for frequency in trip.frequencies.iter() {
            let mut time = frequency.start_time;
            while time < frequency.end_time && frequency.headway_secs > 0 {
                let id = DepartureId::new(format!("{}_{}", trip.id, departures.len()));
                departures.push((id, time));
                time += frequency.headway_secs;
            }
        }
        departures
    };

    Ok(Some(TripPattern { stops, departures }))
}

/// stop times of a trip in ascending stop_sequence order
fn get_ordered_stops(trip: &Trip) -> Vec<&StopTime> {
    trip.stop_times
        .iter()
        .sorted_by_key(|st| st.stop_sequence)
        .collect_vec()
}

/// checks the stop and its parent for lon,lat location. returns None if neither has one.
fn get_stop_location(stop: &GtfsStop, gtfs: &Gtfs) -> Option<Coord<f64>> {
    if let (Some(lon), Some(lat)) = (stop.longitude, stop.latitude) {
        return Some(Coord { x: lon, y: lat });
    }
    stop.parent_station
        .as_ref()
        .and_then(|parent_id| gtfs.stops.get(parent_id))
        .and_then(
            |parent_stop| match (parent_stop.longitude, parent_stop.latitude) {
                (Some(lon), Some(lat)) => Some(Coord { x: lon, y: lat }),
                _ => None,
            },
        )
}
