//! a network built from the schedule alone: every stop becomes a node with a short loop
//! link the stop is served from, and consecutive stops of a route are joined by a
//! straight link. routes then drive `[loop(s0), s0-s1, ..., loop(sn)]`.
use crate::{crs::CoordinateTransform, GtfsConversionError};
use geo::{line_string, Coord, Haversine, Length, LineString, Point};
use ptprep::model::{Link, LinkId, LinkPath, Network, Node, NodeId, Schedule, StopId};
use std::{collections::BTreeSet, sync::Arc};

/// freespeed of new links in m/s, raised per transit mode when the fleet is equipped
pub const LINK_FREESPEED: f64 = 0.1;
pub const LINK_CAPACITY: f64 = 100_000.0;
/// length of the loop link of a stop in meters
pub const LOOP_LINK_LENGTH: f64 = 50.0;

pub fn compute_haversine(src_point: Point<f64>, dst_point: Point<f64>) -> uom::si::f64::Length {
    let line: LineString<f64> = line_string![src_point.0, dst_point.0];
    uom::si::f64::Length::new::<uom::si::length::meter>(Haversine.length(&line))
}

/// adds pseudo links and nodes for `schedule` to `network`. node and link ids start with
/// `prefix`. returns the schedule with every route moved onto the new links and every
/// stop attached to its loop link.
///
/// stop coordinates are expected as lon,lat. when `transform` is given, stops and nodes
/// are moved into the network CRS with it, while link lengths are still measured on the
/// lon,lat coordinates.
pub fn create(
    schedule: &Schedule,
    network: &Network,
    prefix: &str,
    transform: Option<&dyn CoordinateTransform>,
) -> Result<(Schedule, Network), GtfsConversionError> {
    let mut network_new = network.clone();
    let mut schedule_new = Schedule::default();

    for stop in schedule.stops.values() {
        let coord = match transform {
            Some(t) => t.transform(stop.coord)?,
            None => stop.coord,
        };
        let node_id = stop_node_id(prefix, &stop.id);
        network_new.add_node(Node::new(node_id.clone(), coord));
        let mut link = new_link(loop_link_id(prefix, &stop.id), node_id.clone(), node_id);
        link.length = LOOP_LINK_LENGTH;
        network_new.add_link(link);

        let mut stop_new = stop.as_ref().clone();
        stop_new.coord = coord;
        stop_new.link_id = Some(loop_link_id(prefix, &stop.id));
        schedule_new.add_stop(Arc::new(stop_new));
    }

    for line in schedule.lines.values() {
        let mut line_new = line.empty_copy();
        for route in line.routes.values() {
            let mut coords: Vec<Coord<f64>> = Vec::with_capacity(route.stops.len());
            for stop_id in route.stop_ids() {
                let stop = schedule.get_stop(stop_id).ok_or_else(|| {
                    GtfsConversionError::UnknownStop(route.id.clone(), stop_id.clone())
                })?;
                coords.push(stop.coord);
            }

            let stop_ids: Vec<&StopId> = route.stop_ids().collect();
            let mut links: Vec<LinkId> = vec![];
            if let Some(first) = stop_ids.first() {
                links.push(loop_link_id(prefix, first));
            }
            for (idx, pair) in stop_ids.windows(2).enumerate() {
                let link_id = LinkId::new(format!("{prefix}{}-{}", pair[0], pair[1]));
                if network_new.get_link(&link_id).is_none() {
                    let mut link = new_link(
                        link_id.clone(),
                        stop_node_id(prefix, pair[0]),
                        stop_node_id(prefix, pair[1]),
                    );
                    let length = compute_haversine(coords[idx].into(), coords[idx + 1].into());
                    link.length = length.get::<uom::si::length::meter>();
                    network_new.add_link(link);
                }
                links.push(link_id);
            }
            if let Some(last) = stop_ids.last() {
                links.push(loop_link_id(prefix, last));
            }

            for link_id in links.iter() {
                if let Some(link) = network_new.links.get_mut(link_id) {
                    link.modes.insert(route.transport_mode.clone());
                }
            }
            let mut route_new = route.as_ref().clone();
            route_new.link_path = LinkPath::new(links);
            line_new.add_route(Arc::new(route_new));
        }
        schedule_new.add_line(Arc::new(line_new));
    }

    log::info!(
        "pseudo network has {} nodes and {} links",
        network_new.nodes.len(),
        network_new.links.len()
    );
    Ok((schedule_new, network_new))
}

fn stop_node_id(prefix: &str, stop_id: &StopId) -> NodeId {
    NodeId::new(format!("{prefix}{stop_id}"))
}

fn loop_link_id(prefix: &str, stop_id: &StopId) -> LinkId {
    LinkId::new(format!("{prefix}{stop_id}"))
}

fn new_link(id: LinkId, from: NodeId, to: NodeId) -> Link {
    let mut link = Link::new(id, from, to);
    link.freespeed = LINK_FREESPEED;
    link.capacity = LINK_CAPACITY;
    link.modes = BTreeSet::new();
    link
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptprep::{
        model::{Line, LineId, Route, RouteId, RouteStop, Stop},
        validation,
    };

    fn schedule() -> Schedule {
        let mut schedule = Schedule::default();
        for (id, x) in [("a", 13.40), ("b", 13.41), ("c", 13.42)] {
            schedule.add_stop(Arc::new(Stop::new(StopId::from(id), Coord { x, y: 52.5 })));
        }
        let mut line = Line::new(LineId::from("l"));
        for (route_id, stops) in [("r0", ["a", "b", "c"]), ("r1", ["c", "b", "a"])] {
            let stops = stops
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let offset = i as u32 * 60;
                    RouteStop::new(StopId::from(*s), Some(offset), Some(offset))
                })
                .collect();
            line.add_route(Arc::new(Route::new(
                RouteId::from(route_id),
                LinkPath::default(),
                stops,
                "pt",
            )));
        }
        schedule.add_line(Arc::new(line));
        schedule
    }

    #[test]
    fn test_routes_drive_loop_and_pair_links() {
        let (schedule, network) = create(&schedule(), &Network::default(), "pt_", None).unwrap();
        let route = &schedule.lines[&LineId::from("l")].routes[&RouteId::from("r0")];
        let links: Vec<&str> = route.link_path.iter().map(|l| l.as_str()).collect();
        assert_eq!(links, vec!["pt_a", "pt_a-b", "pt_b-c", "pt_c"]);
        assert_eq!(route.link_path.len(), route.stops.len() + 1);

        assert_eq!(network.nodes.len(), 3);
        // 3 loops plus 2 links per direction
        assert_eq!(network.links.len(), 7);
        let stop = schedule.get_stop(&StopId::from("b")).unwrap();
        assert_eq!(stop.link_id, Some(LinkId::from("pt_b")));

        let result = validation::validate_all(&schedule, Some(&network));
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_link_attributes() {
        let (_, network) = create(&schedule(), &Network::default(), "pt_", None).unwrap();
        let pair = network.get_link(&LinkId::from("pt_a-b")).unwrap();
        // 0.01 degrees of longitude at 52.5 degrees north is about 677 meters
        assert!((pair.length - 677.0).abs() < 5.0, "length was {}", pair.length);
        assert_eq!(pair.freespeed, LINK_FREESPEED);
        assert_eq!(pair.capacity, LINK_CAPACITY);
        assert!(pair.modes.contains("pt"));
        let loop_link = network.get_link(&LinkId::from("pt_a")).unwrap();
        assert_eq!(loop_link.from, loop_link.to);
        assert_eq!(loop_link.length, LOOP_LINK_LENGTH);
    }

    #[test]
    fn test_existing_network_is_kept() {
        let mut network = Network::default();
        network.add_node(Node::new(NodeId::from("n1"), Coord { x: 0.0, y: 0.0 }));
        network.add_link(Link::new(LinkId::from("car"), NodeId::from("n1"), NodeId::from("n1")));
        let (_, network) = create(&schedule(), &network, "pt_", None).unwrap();
        assert!(network.get_link(&LinkId::from("car")).is_some());
        assert_eq!(network.nodes.len(), 4);
    }

    /// shifts and scales lon,lat into a local metric-like plane
    struct Offset;

    impl CoordinateTransform for Offset {
        fn transform(&self, coord: Coord<f64>) -> Result<Coord<f64>, GtfsConversionError> {
            Ok(Coord {
                x: 4_500_000.0 + coord.x * 1000.0,
                y: 5_000_000.0 + coord.y * 1000.0,
            })
        }
    }

    #[test]
    fn test_transformed_coordinates_keep_haversine_lengths() {
        let (schedule, network) =
            create(&schedule(), &Network::default(), "pt_", Some(&Offset)).unwrap();
        let node = &network.nodes[&NodeId::from("pt_a")];
        assert_eq!(node.coord, Coord { x: 4_513_400.0, y: 5_052_500.0 });
        let stop = schedule.get_stop(&StopId::from("a")).unwrap();
        assert_eq!(stop.coord, node.coord);

        let pair = network.get_link(&LinkId::from("pt_a-b")).unwrap();
        assert!((pair.length - 677.0).abs() < 5.0, "length was {}", pair.length);
    }
}
