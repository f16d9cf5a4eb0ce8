use super::{DepartureId, LinkPath, RouteId, StopId, VehicleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// a stop served by a route. offsets are seconds after the departure of the trip
/// and are carried through trimming unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStop {
    pub stop_id: StopId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_offset: Option<u32>,
    #[serde(default)]
    pub await_departure: bool,
}

impl RouteStop {
    pub fn new(stop_id: StopId, arrival_offset: Option<u32>, departure_offset: Option<u32>) -> Self {
        Self {
            stop_id,
            arrival_offset,
            departure_offset,
            await_departure: false,
        }
    }
}

/// one scheduled trip of a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    pub id: DepartureId,
    /// seconds after midnight of the service day. may exceed 24 hours.
    pub departure_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<VehicleId>,
}

impl Departure {
    pub fn new(id: DepartureId, departure_time: u32) -> Departure {
        Departure {
            id,
            departure_time,
            vehicle_id: None,
        }
    }
}

/// one directional stop pattern of a line, with the link path it drives and
/// the departures scheduled on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub transport_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stops: Vec<RouteStop>,
    pub link_path: LinkPath,
    #[serde(default)]
    pub departures: BTreeMap<DepartureId, Departure>,
}

impl Route {
    pub fn new(
        id: RouteId,
        link_path: LinkPath,
        stops: Vec<RouteStop>,
        transport_mode: &str,
    ) -> Route {
        Route {
            id,
            transport_mode: transport_mode.to_string(),
            description: None,
            stops,
            link_path,
            departures: BTreeMap::new(),
        }
    }

    pub fn add_departure(&mut self, departure: Departure) {
        self.departures.insert(departure.id.clone(), departure);
    }

    pub fn stop_ids(&self) -> impl Iterator<Item = &StopId> {
        self.stops.iter().map(|s| &s.stop_id)
    }
}
