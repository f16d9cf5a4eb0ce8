//! hand-built schedules for trimming tests. a mock route over stops `s0..sn` drives
//! links `{route}_l0..{route}_ln`, which form a chain through nodes `{route}_n0..`.
use crate::{
    model::{
        Departure, DepartureId, Line, LineId, Link, LinkId, LinkPath, Network, Node, NodeId,
        Route, RouteId, RouteStop, Schedule, Stop, StopId, VehicleId,
    },
    zone::ZoneMembership,
};
use geo::Coord;
use std::sync::Arc;

pub fn mock_links(route_id: &str, n_stops: usize) -> Vec<LinkId> {
    (0..=n_stops)
        .map(|i| LinkId::new(format!("{route_id}_l{i}")))
        .collect()
}

pub fn mock_route(route_id: &str, stops: &[&str]) -> Route {
    let route_stops = stops
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let offset = (i as u32) * 120;
            RouteStop::new(StopId::from(*s), Some(offset), Some(offset + 20))
        })
        .collect();
    let mut route = Route::new(
        RouteId::from(route_id),
        LinkPath::new(mock_links(route_id, stops.len())),
        route_stops,
        "bus",
    );
    route.description = Some(format!("mock route {route_id}"));
    let mut departure = Departure::new(DepartureId::new(format!("{route_id}_d0")), 8 * 3600);
    departure.vehicle_id = Some(VehicleId::new(format!("veh_{route_id}")));
    route.add_departure(departure);
    route
}

/// network containing the chained links of each route
pub fn mock_network(routes: &[&Route]) -> Network {
    let mut network = Network::default();
    for route in routes {
        let n_links = route.link_path.len();
        for i in 0..=n_links {
            let id = NodeId::new(format!("{}_n{i}", route.id));
            network.add_node(Node::new(id, Coord { x: i as f64, y: 0.0 }));
        }
        for (i, link_id) in route.link_path.iter().enumerate() {
            network.add_link(Link::new(
                link_id.clone(),
                NodeId::new(format!("{}_n{i}", route.id)),
                NodeId::new(format!("{}_n{}", route.id, i + 1)),
            ));
        }
    }
    network
}

pub fn mock_zone(stops: &[&str]) -> ZoneMembership {
    ZoneMembership::from_stop_ids(stops.iter().map(|s| StopId::from(*s)))
}

/// schedule with one line per entry of `lines`, each holding the given routes, and a
/// stop for every stop id referenced.
pub fn mock_schedule(lines: &[(&str, Vec<Route>)]) -> Schedule {
    let mut schedule = Schedule::default();
    for (line_id, routes) in lines {
        let mut line = Line::new(LineId::from(*line_id));
        for route in routes {
            for (i, stop_id) in route.stop_ids().enumerate() {
                if schedule.get_stop(stop_id).is_none() {
                    let stop = Stop::new(stop_id.clone(), Coord { x: i as f64, y: 1.0 });
                    schedule.add_stop(Arc::new(stop));
                }
            }
            line.add_route(Arc::new(route.clone()));
        }
        schedule.add_line(Arc::new(line));
    }
    schedule
}
