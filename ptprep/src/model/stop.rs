use super::{LinkId, StopId};
use geo::Coord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// a physical stop facility. stops are reference data: they are shared by every
/// transformation of a schedule and never modified by trimming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub coord: Coord<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// network link this stop is served from, if attached to a network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_id: Option<LinkId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Stop {
    pub fn new(id: StopId, coord: Coord<f64>) -> Stop {
        Stop {
            id,
            coord,
            name: None,
            link_id: None,
            attributes: BTreeMap::new(),
        }
    }
}
