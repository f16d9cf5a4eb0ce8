//! transit vehicles and link speeds per transit mode. lines are matched to a mode by the
//! GTFS route type they were converted from.
use crate::{convert::GTFS_AGENCY_ID, convert::GTFS_ROUTE_TYPE, GtfsConversionError};
use ptprep::model::{
    DoorOperationMode, Network, Schedule, StopId, Vehicle, VehicleId, VehicleType, VehicleTypeId,
    Vehicles,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use uom::si::{
    f64::Velocity,
    velocity::{kilometer_per_hour, meter_per_second},
};

/// stop attribute holding the stop filter tag of rail and metro stations
pub const STOP_FILTER_ATTRIBUTE: &str = "stopFilter";

/// vehicle type and link speed of one transit mode
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeProfile {
    pub name: String,
    /// GTFS route type codes served by this mode
    pub route_types: Vec<i16>,
    pub vehicle_type: VehicleTypeId,
    /// minimum freespeed of the links driven by this mode, in km/h
    pub freespeed_kmh: f64,
    /// replaces `freespeed_kmh` for lines run by one of the urban agencies
    #[serde(default)]
    pub urban_freespeed_kmh: Option<f64>,
    /// tag written to the stops served by this mode
    #[serde(default)]
    pub stop_filter: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FleetConfiguration {
    pub vehicle_id_prefix: String,
    pub vehicle_types: Vec<VehicleType>,
    pub modes: Vec<ModeProfile>,
    /// GTFS agency ids whose bus lines run at urban speed
    pub urban_agency_ids: Vec<String>,
}

fn vehicle_type(id: &str, seats: u32, standing_room: u32) -> VehicleType {
    VehicleType {
        id: VehicleTypeId::from(id),
        seats,
        standing_room,
        door_operation: DoorOperationMode::Parallel,
    }
}

fn mode(
    name: &str,
    route_types: &[i16],
    vehicle_type: &str,
    freespeed_kmh: f64,
    stop_filter: Option<&str>,
) -> ModeProfile {
    ModeProfile {
        name: name.to_string(),
        route_types: route_types.to_vec(),
        vehicle_type: VehicleTypeId::from(vehicle_type),
        freespeed_kmh,
        urban_freespeed_kmh: None,
        stop_filter: stop_filter.map(String::from),
    }
}

impl Default for FleetConfiguration {
    /// capacities at the upper end of the typical range of each mode
    fn default() -> Self {
        let station_filter = Some("station_S/U/RE/RB");
        let mut bus = mode("bus", &[3, 700], "Bus_veh_type", 50.0, None);
        bus.urban_freespeed_kmh = Some(30.0);
        Self {
            vehicle_id_prefix: String::from("pt_"),
            vehicle_types: vec![
                vehicle_type("RE_RB_veh_type", 500, 600),
                vehicle_type("S-Bahn_veh_type", 400, 800),
                vehicle_type("U-Bahn_veh_type", 300, 600),
                vehicle_type("Tram_veh_type", 80, 170),
                vehicle_type("Bus_veh_type", 50, 100),
                vehicle_type("Ferry_veh_type", 100, 100),
            ],
            modes: vec![
                mode("regional rail", &[100], "RE_RB_veh_type", 100.0, station_filter),
                mode("suburban rail", &[109], "S-Bahn_veh_type", 60.0, station_filter),
                mode("metro", &[400], "U-Bahn_veh_type", 50.0, station_filter),
                bus,
                mode("tram", &[900], "Tram_veh_type", 30.0, None),
                mode("ferry", &[1000], "Ferry_veh_type", 30.0, None),
            ],
            urban_agency_ids: vec![String::from("796")],
        }
    }
}

impl TryFrom<&String> for FleetConfiguration {
    type Error = GtfsConversionError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let s = std::fs::read_to_string(f).map_err(|e| {
            GtfsConversionError::ConfigurationError(format!("failure reading {f}: {e}"))
        })?;
        if f.ends_with(".toml") {
            toml::from_str(&s).map_err(|e| {
                GtfsConversionError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            serde_json::from_str(&s).map_err(|e| {
                GtfsConversionError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(GtfsConversionError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}

impl FleetConfiguration {
    fn find_mode(&self, route_type: i16) -> Option<&ModeProfile> {
        self.modes.iter().find(|m| m.route_types.contains(&route_type))
    }
}

/// creates one vehicle per departure and raises the freespeed of every link a route
/// drives to the speed of its mode. stops served by modes with a stop filter are tagged.
///
/// # Returns
///
/// the schedule with vehicles assigned, the network with updated speeds and the fleet,
/// or an error for a line without a known GTFS route type or a route on an unknown link
pub fn equip(
    schedule: &Schedule,
    network: &Network,
    config: &FleetConfiguration,
) -> Result<(Schedule, Network, Vehicles), GtfsConversionError> {
    let mut vehicles = Vehicles::default();
    for vehicle_type in config.vehicle_types.iter() {
        vehicles.add_type(vehicle_type.clone());
    }
    let mut network_new = network.clone();
    let mut stop_filters: HashMap<StopId, String> = HashMap::new();
    let mut lines = vec![];

    for line in schedule.lines.values() {
        let route_type = line
            .attributes
            .get(GTFS_ROUTE_TYPE)
            .cloned()
            .unwrap_or_default();
        let profile = route_type
            .parse::<i16>()
            .ok()
            .and_then(|code| config.find_mode(code))
            .ok_or_else(|| GtfsConversionError::UnknownRouteType {
                line_id: line.id.clone(),
                route_type: route_type.clone(),
            })?;
        if !vehicles.types.contains_key(&profile.vehicle_type) {
            return Err(GtfsConversionError::UnknownVehicleType(
                profile.vehicle_type.clone(),
            ));
        }

        let is_urban = line
            .attributes
            .get(GTFS_AGENCY_ID)
            .is_some_and(|agency| config.urban_agency_ids.contains(agency));
        let freespeed_kmh = match (profile.urban_freespeed_kmh, is_urban) {
            (Some(urban), true) => urban,
            _ => profile.freespeed_kmh,
        };
        let freespeed = Velocity::new::<kilometer_per_hour>(freespeed_kmh).get::<meter_per_second>();

        let mut line_new = line.empty_copy();
        for route in line.routes.values() {
            // should different modes share a link, the higher freespeed wins
            for link_id in route.link_path.iter() {
                let link = network_new.links.get_mut(link_id).ok_or_else(|| {
                    GtfsConversionError::UnknownLink(route.id.clone(), link_id.clone())
                })?;
                if link.freespeed < freespeed {
                    link.freespeed = freespeed;
                }
            }

            let mut route_new = route.as_ref().clone();
            for (k, departure) in route_new.departures.values_mut().enumerate() {
                let vehicle_id =
                    VehicleId::new(format!("{}{}_{k}", config.vehicle_id_prefix, route.id));
                vehicles.add_vehicle(Vehicle {
                    id: vehicle_id.clone(),
                    vehicle_type: profile.vehicle_type.clone(),
                });
                departure.vehicle_id = Some(vehicle_id);
            }

            if let Some(filter) = &profile.stop_filter {
                for stop_id in route.stop_ids() {
                    stop_filters.insert(stop_id.clone(), filter.clone());
                }
            }
            line_new.add_route(Arc::new(route_new));
        }
        lines.push(Arc::new(line_new));
    }

    let mut schedule_new = Schedule::default();
    for stop in schedule.stops.values() {
        match stop_filters.get(&stop.id) {
            Some(filter) => {
                let mut stop_new = stop.as_ref().clone();
                stop_new
                    .attributes
                    .insert(STOP_FILTER_ATTRIBUTE.to_string(), filter.clone());
                schedule_new.add_stop(Arc::new(stop_new));
            }
            None => schedule_new.add_stop(stop.clone()),
        }
    }
    for line in lines {
        schedule_new.add_line(line);
    }
    log::info!(
        "created {} vehicles of {} types",
        vehicles.vehicles.len(),
        vehicles.types.len()
    );
    Ok((schedule_new, network_new, vehicles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pseudo_network;
    use geo::Coord;
    use ptprep::model::{
        Departure, DepartureId, Line, LineId, LinkId, LinkPath, Route, RouteId, RouteStop, Stop,
    };

    fn line(id: &str, route_type: &str, agency: &str, stops: [&str; 2]) -> Line {
        let mut line = Line::new(LineId::from(id));
        line.attributes
            .insert(GTFS_ROUTE_TYPE.to_string(), route_type.to_string());
        line.attributes
            .insert(GTFS_AGENCY_ID.to_string(), agency.to_string());
        let route_stops = stops
            .iter()
            .enumerate()
            .map(|(i, s)| RouteStop::new(StopId::from(*s), Some(i as u32 * 60), None))
            .collect();
        let mut route = Route::new(
            RouteId::new(format!("{id}_0")),
            LinkPath::default(),
            route_stops,
            "pt",
        );
        for (k, time) in [3600, 7200].iter().enumerate() {
            route.add_departure(Departure::new(DepartureId::new(format!("{id}_t{k}")), *time));
        }
        line.add_route(Arc::new(route));
        line
    }

    fn scenario(lines: Vec<Line>) -> (Schedule, Network) {
        let mut schedule = Schedule::default();
        for (id, x) in [("a", 13.40), ("b", 13.41), ("c", 13.42)] {
            schedule.add_stop(Arc::new(Stop::new(StopId::from(id), Coord { x, y: 52.5 })));
        }
        for line in lines {
            schedule.add_line(Arc::new(line));
        }
        pseudo_network::create(&schedule, &Network::default(), "pt_", None).unwrap()
    }

    fn kmh(link: &ptprep::model::Link) -> f64 {
        (link.freespeed * 3.6 * 1000.0).round() / 1000.0
    }

    #[test]
    fn test_vehicles_and_speeds_per_mode() {
        let (schedule, network) = scenario(vec![
            line("s1", "109", "796", ["a", "b"]),
            line("bus_urban", "700", "796", ["b", "c"]),
        ]);
        let config = FleetConfiguration::default();
        let (schedule, network, vehicles) = equip(&schedule, &network, &config).unwrap();

        let ids: Vec<&str> = vehicles.vehicles.keys().map(|v| v.as_str()).collect();
        assert_eq!(
            ids,
            vec!["pt_bus_urban_0_0", "pt_bus_urban_0_1", "pt_s1_0_0", "pt_s1_0_1"]
        );
        assert_eq!(
            vehicles.vehicles[&VehicleId::from("pt_s1_0_0")].vehicle_type,
            VehicleTypeId::from("S-Bahn_veh_type")
        );
        assert_eq!(vehicles.types.len(), 6);

        for (_, route) in schedule.routes() {
            assert!(route.departures.values().all(|d| d.vehicle_id.is_some()));
        }
        assert_eq!(kmh(&network.links[&LinkId::from("pt_a-b")]), 60.0);
        assert_eq!(kmh(&network.links[&LinkId::from("pt_b-c")]), 30.0);
        // shared by both lines, the faster mode wins
        assert_eq!(kmh(&network.links[&LinkId::from("pt_b")]), 60.0);

        let tagged = schedule.get_stop(&StopId::from("a")).unwrap();
        assert_eq!(
            tagged.attributes.get(STOP_FILTER_ATTRIBUTE).map(String::as_str),
            Some("station_S/U/RE/RB")
        );
        let untagged = schedule.get_stop(&StopId::from("c")).unwrap();
        assert!(untagged.attributes.is_empty());
    }

    #[test]
    fn test_regional_bus_speed() {
        let (schedule, network) = scenario(vec![line("bus", "3", "1", ["a", "b"])]);
        let (_, network, _) = equip(&schedule, &network, &FleetConfiguration::default()).unwrap();
        assert_eq!(kmh(&network.links[&LinkId::from("pt_a-b")]), 50.0);
    }

    #[test]
    fn test_unknown_route_type() {
        let (schedule, network) = scenario(vec![line("cable", "1300", "1", ["a", "b"])]);
        let result = equip(&schedule, &network, &FleetConfiguration::default());
        assert!(matches!(
            result,
            Err(GtfsConversionError::UnknownRouteType { route_type, .. }) if route_type == "1300"
        ));
    }

    #[test]
    fn test_configuration_from_toml() {
        let dir = tempfile::tempdir().expect("test invariant failed: unable to create temp dir");
        let file = dir.path().join("fleet.toml");
        std::fs::write(
            &file,
            r#"
            vehicle_id_prefix = "veh_"
            urban_agency_ids = []

            [[vehicle_types]]
            id = "small_bus"
            seats = 20
            standing_room = 10

            [[modes]]
            name = "bus"
            route_types = [3]
            vehicle_type = "small_bus"
            freespeed_kmh = 40.0
            "#,
        )
        .unwrap();
        let config = FleetConfiguration::try_from(&file.to_str().unwrap().to_string()).unwrap();
        assert_eq!(config.vehicle_types[0].door_operation, DoorOperationMode::Serial);
        assert_eq!(config.modes[0].urban_freespeed_kmh, None);
        assert_eq!(config.find_mode(3).map(|m| m.name.as_str()), Some("bus"));
        assert!(config.find_mode(700).is_none());
    }
}
